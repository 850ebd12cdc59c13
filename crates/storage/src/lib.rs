// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Filesystem-backed application repository.
//!
//! ```text
//! <root>/.lock
//! <root>/applications/<app-id>/application.dmi
//! <root>/applications/<app-id>/resources/...
//! ```

pub mod archive;
mod error;
mod files;
mod layout;
mod repository;

pub use error::RepositoryError;
pub use layout::Layout;
pub use repository::ApplicationRepository;
