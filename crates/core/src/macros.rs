// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared by the DMI object model.
//!
//! [`simple_display!`] names the variants of fieldless enums such as
//! lifecycle states and port kinds. [`builder!`] generates fixture builders
//! for tests, and [`setters!`] the chained `with_*` methods used by both.

/// Generate a `Display` impl that maps enum variants to string literals.
///
/// ```ignore
/// crate::simple_display! {
///     PortKind {
///         Input => "input",
///         Output => "output",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant => $str, )+
                })
            }
        }
    };
}

/// Generate a fixture builder whose defaults describe a plausible object.
///
/// Only compiled for tests and the `test-support` feature. Field groups:
/// `into` setters take `impl Into<T>`, `set` setters take `T`, `option`
/// fields start as the given `Option` and `computed` fields are evaluated
/// fresh on every `build()`.
///
/// ```ignore
/// crate::builder! {
///     pub struct ServiceInstanceBuilder => ServiceInstance {
///         into { name: String = "transformer" }
///         option { peer_server: String = None }
///         computed { id: ServiceId = ServiceId::new() }
///     }
/// }
/// ```
#[macro_export]
macro_rules! builder {
    (
        pub struct $builder:ident => $target:ident {
            $(into {
                $( $into_field:ident : $into_ty:ty = $into_default:expr ),* $(,)?
            })?
            $(set {
                $( $set_field:ident : $set_ty:ty = $set_default:expr ),* $(,)?
            })?
            $(option {
                $( $opt_field:ident : $opt_ty:ty = $opt_default:expr ),* $(,)?
            })?
            $(computed {
                $( $comp_field:ident : $comp_ty:ty = $comp_expr:expr ),* $(,)?
            })?
        }
    ) => {
        #[cfg(any(test, feature = "test-support"))]
        pub struct $builder {
            $($( $into_field: $into_ty, )*)?
            $($( $set_field: $set_ty, )*)?
            $($( $opt_field: Option<$opt_ty>, )*)?
        }

        #[cfg(any(test, feature = "test-support"))]
        impl Default for $builder {
            fn default() -> Self {
                Self {
                    $($( $into_field: $into_default.into(), )*)?
                    $($( $set_field: $set_default, )*)?
                    $($( $opt_field: $opt_default, )*)?
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $builder {
            $crate::setters! {
                into { $($( $into_field => $into_field: $into_ty, )*)? }
                set { $($( $set_field => $set_field: $set_ty, )*)? }
                option { $($( $opt_field => $opt_field: $opt_ty, )*)? }
            }

            pub fn build(self) -> $target {
                $target {
                    $($( $into_field: self.$into_field, )*)?
                    $($( $set_field: self.$set_field, )*)?
                    $($( $opt_field: self.$opt_field, )*)?
                    $($( $comp_field: $comp_expr, )*)?
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $target {
            /// Create a builder with test defaults.
            pub fn builder() -> $builder {
                $builder::default()
            }
        }
    };
}

/// Expand to by-value setter methods inside an `impl` block.
///
/// ```ignore
/// impl Port {
///     dmi_core::setters! {
///         set { persistent => persistent: bool }
///         option { with_content_type => content_type: String }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(into {
            $( $into_fn:ident => $into_field:ident : $into_ty:ty ),* $(,)?
        })?
        $(set {
            $( $set_fn:ident => $set_field:ident : $set_ty:ty ),* $(,)?
        })?
        $(option {
            $( $opt_fn:ident => $opt_field:ident : $opt_ty:ty ),* $(,)?
        })?
    ) => {
        $($(
            pub fn $into_fn(mut self, v: impl Into<$into_ty>) -> Self {
                self.$into_field = v.into();
                self
            }
        )*)?

        $($(
            pub fn $set_fn(mut self, v: $set_ty) -> Self {
                self.$set_field = v;
                self
            }
        )*)?

        $($(
            pub fn $opt_fn(mut self, v: impl Into<$opt_ty>) -> Self {
                self.$opt_field = Some(v.into());
                self
            }
        )*)?
    };
}
