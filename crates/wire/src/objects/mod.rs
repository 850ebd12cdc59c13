// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary layouts of the core object model.

mod management;
mod model;
mod runtime;

use dmi_core::{
    ApplicationState, DestinationType, KeyEntryKind, LaunchKind, PortKind, PrincipalKind,
    PropertyKind, ServerRole, ServiceStatus,
};

use crate::codec::WireEnum;

/// Assign stable one-byte codes to a fieldless enum.
macro_rules! wire_enum {
    ($ty:ident, $kind:literal { $( $variant:ident = $code:literal ),+ $(,)? }) => {
        impl WireEnum for $ty {
            const KIND: &'static str = $kind;

            fn code(self) -> u8 {
                match self {
                    $( $ty::$variant => $code, )+
                }
            }

            fn from_code(code: u8) -> Option<Self> {
                match code {
                    $( $code => Some($ty::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

wire_enum!(ApplicationState, "application state" {
    Installed = 0,
    Deployed = 1,
    Launching = 2,
    Running = 3,
    Stopping = 4,
    Stopped = 5,
    Failed = 6,
});

wire_enum!(PortKind, "port kind" { Input = 0, Output = 1, Fault = 2 });

wire_enum!(DestinationType, "destination type" { Queue = 0, Topic = 1 });

wire_enum!(LaunchKind, "launch kind" { InMemory = 0, Separate = 1, Manual = 2 });

wire_enum!(ServiceStatus, "service status" {
    Unknown = 0,
    Launching = 1,
    Running = 2,
    Stopping = 3,
    Stopped = 4,
    Failed = 5,
});

wire_enum!(ServerRole, "server role" { Standalone = 0, Primary = 1, Backup = 2 });

wire_enum!(PropertyKind, "property kind" {
    String = 0,
    Integer = 1,
    Boolean = 2,
    Path = 3,
    Secret = 4,
});

wire_enum!(PrincipalKind, "principal kind" { User = 0, Group = 1 });

wire_enum!(KeyEntryKind, "key entry kind" {
    PrivateKey = 0,
    TrustedCertificate = 1,
    SecretKey = 2,
});

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
