// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dmi-core: Data Model Interchange objects for the service bus metadata layer

pub mod macros;

pub mod application;
pub mod archive;
pub mod clock;
pub mod id;
pub mod lifecycle;
pub mod management;
pub mod port;
pub mod route;
pub mod server;
pub mod service;
pub mod status;
pub mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use application::{Application, ApplicationId};
pub use archive::{ApplicationArchive, ArchiveEntry};
pub use clock::{Clock, FakeClock, SystemClock};
pub use id::short;
pub use lifecycle::{ApplicationState, LifecycleAction, LifecycleError};
pub use management::{
    ConfigProperty, KeyEntryKind, KeyStoreEntry, PrincipalKind, PropertyKind, SecurityPrincipal,
};
pub use port::{DestinationType, Port, PortKind};
pub use route::{Endpoint, Route, RouteId};
pub use server::{PeerServer, ServerRole};
#[cfg(any(test, feature = "test-support"))]
pub use service::ServiceInstanceBuilder;
pub use service::{LaunchKind, ServiceId, ServiceInstance};
pub use status::{ApplicationHealth, ApplicationRuntimeStatus, ServiceRuntimeStatus, ServiceStatus};
pub use validate::ValidationError;
