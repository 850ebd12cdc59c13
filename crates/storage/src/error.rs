// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use dmi_core::{ApplicationState, LifecycleError, ValidationError};
use dmi_wire::WireError;
use thiserror::Error;

/// Errors that can occur in repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("repository at {} is locked by another process", .0.display())]
    Locked(PathBuf),

    #[error("decode error in {}: {source}", path.display())]
    Corrupt { path: PathBuf, source: WireError },

    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    #[error("invalid application id '{0}'")]
    InvalidId(String),

    #[error("invalid application: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("application not found: {0}")]
    NotFound(String),

    #[error("application {0} already exists")]
    AlreadyExists(String),

    #[error("an application named '{0}' already exists")]
    DuplicateName(String),

    #[error("application {id} is {state}")]
    Busy { id: String, state: ApplicationState },

    #[error("invalid resource path: {0}")]
    InvalidResourcePath(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("archive is not zstd-compressed DMI: {0}")]
    BadArchive(std::io::Error),
}
