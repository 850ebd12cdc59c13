// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes for DMI objects

/// Returns a string slice truncated to at most `n` characters.
pub fn short(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Declare a prefixed identifier type for one kind of DMI object.
///
/// Generated ids read `{prefix}{nanoid}`: a 4 character kind marker ("app-",
/// "svc-", "rte-") plus 19 random characters. At 23 bytes the whole id fits
/// inside a `SmolStr` without allocating.
///
/// Ids decoded from the wire or typed by a user go through `from_string()`
/// unchanged; only locally generated ids are guaranteed to carry the prefix.
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($prefix:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                let mut id = String::with_capacity(Self::PREFIX.len() + 19);
                id.push_str(Self::PREFIX);
                id.push_str(&nanoid::nanoid!(19));
                Self(smol_str::SmolStr::new(id))
            }

            pub fn from_string(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The id without its kind marker; the whole id for foreign ids.
            pub fn suffix(&self) -> &str {
                self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
            }

            /// First `n` characters of [`Self::suffix`], for tables.
            pub fn short(&self, n: usize) -> &str {
                $crate::id::short(self.suffix(), n)
            }

            /// Whether `query` starts the full id or its suffix, so the short
            /// form printed in tables resolves too.
            pub fn matches_prefix(&self, query: &str) -> bool {
                !query.is_empty() && (self.0.starts_with(query) || self.suffix().starts_with(query))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        // Lets id-keyed maps be queried with a plain `&str`.
        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }
    };
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
