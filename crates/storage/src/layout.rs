// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk paths of a repository.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use fs2::FileExt;

use crate::error::RepositoryError;

const APPLICATIONS_DIR: &str = "applications";
const DEFINITION_FILE: &str = "application.dmi";
const RESOURCES_DIR: &str = "resources";
const LOCK_FILE: &str = ".lock";

/// Suffix of directories being staged or retired; swept on open.
pub(crate) const STAGING_SUFFIX: &str = ".tmp";

/// Reject ids that cannot name exactly one application directory.
///
/// The id must be a single plain path component, must not be hidden and
/// must not carry the staging suffix, or the next open would sweep it.
pub(crate) fn check_id(id: &str) -> Result<(), RepositoryError> {
    let mut components = Path::new(id).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == id
    );
    let hidden = id.starts_with('.') || id.ends_with(STAGING_SUFFIX);
    if !single || hidden || id.contains(['/', '\\']) {
        return Err(RepositoryError::InvalidId(id.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    pub fn applications_dir(&self) -> PathBuf {
        self.root.join(APPLICATIONS_DIR)
    }

    pub fn app_dir(&self, id: &str) -> PathBuf {
        self.applications_dir().join(id)
    }

    pub fn definition_path(&self, id: &str) -> PathBuf {
        definition_in(&self.app_dir(id))
    }

    pub fn resources_dir(&self, id: &str) -> PathBuf {
        resources_in(&self.app_dir(id))
    }

    /// Where a new application directory is assembled before it is renamed into place.
    pub(crate) fn staging_dir(&self, id: &str) -> PathBuf {
        self.applications_dir().join(format!("{id}{STAGING_SUFFIX}"))
    }

    /// Where a replaced application directory is parked until the swap completes.
    pub(crate) fn retired_dir(&self, id: &str) -> PathBuf {
        self.applications_dir().join(format!("{id}.old{STAGING_SUFFIX}"))
    }

    /// Create the directory tree and take the exclusive repository lock.
    ///
    /// The lock is released when the returned file is dropped.
    pub(crate) fn create_and_lock(&self) -> Result<File, RepositoryError> {
        std::fs::create_dir_all(self.applications_dir())?;
        let lock_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;
        lock_file.try_lock_exclusive().map_err(|_| RepositoryError::Locked(self.root.clone()))?;
        Ok(lock_file)
    }
}

/// Definition file inside an application (or staging) directory.
pub(crate) fn definition_in(dir: &Path) -> PathBuf {
    dir.join(DEFINITION_FILE)
}

pub(crate) fn resources_in(dir: &Path) -> PathBuf {
    dir.join(RESOURCES_DIR)
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
