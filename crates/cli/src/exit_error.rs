// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use dmi_storage::RepositoryError;

/// Generic failure
pub const FAILURE: i32 = 1;
/// Application or resource does not exist
pub const NOT_FOUND: i32 = 3;
/// Request conflicts with current state (duplicate, busy, bad transition)
pub const CONFLICT: i32 = 4;
/// Repository is locked by another process
pub const LOCKED: i32 = 5;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<RepositoryError> for ExitError {
    fn from(err: RepositoryError) -> Self {
        let code = match &err {
            RepositoryError::NotFound(_) | RepositoryError::ResourceNotFound(_) => NOT_FOUND,
            RepositoryError::AlreadyExists(_)
            | RepositoryError::DuplicateName(_)
            | RepositoryError::Busy { .. }
            | RepositoryError::Lifecycle(_) => CONFLICT,
            RepositoryError::Locked(_) => LOCKED,
            _ => FAILURE,
        };
        Self::new(code, err.to_string())
    }
}

impl ExitError {
    /// Recover the exit code for an error bubbled up through `anyhow`.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ExitError>() {
            Ok(exit) => return exit,
            Err(err) => err,
        };
        match err.downcast::<RepositoryError>() {
            Ok(repo) => Self::from(repo),
            Err(other) => Self::new(FAILURE, format!("{other:#}")),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
