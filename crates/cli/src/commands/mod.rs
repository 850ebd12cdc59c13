// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod app;
pub mod codec;
pub mod resource;
pub mod types;
