// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource-tree operations on installed applications.

use std::fs;
use std::path::PathBuf;

use dmi_core::Clock;
use tracing::debug;

use super::{resolve, ApplicationRepository};
use crate::error::RepositoryError;
use crate::files;

impl<C: Clock> ApplicationRepository<C> {
    /// Relative paths of every resource file, sorted.
    pub fn resources(&self, id: &str) -> Result<Vec<String>, RepositoryError> {
        let index = self.index.read();
        let id = resolve(&index, id)?;
        Ok(files::list_files(&self.layout.resources_dir(id.as_str()))?)
    }

    pub fn read_resource(&self, id: &str, path: &str) -> Result<Vec<u8>, RepositoryError> {
        let index = self.index.read();
        let id = resolve(&index, id)?;
        let file = self.resource_path(id.as_str(), path)?;
        if !file.is_file() {
            return Err(RepositoryError::ResourceNotFound(path.to_string()));
        }
        Ok(fs::read(file)?)
    }

    /// Create or overwrite a resource file.
    pub fn put_resource(&self, id: &str, path: &str, data: &[u8]) -> Result<(), RepositoryError> {
        let mut index = self.index.write();
        let id = resolve(&index, id)?;
        let file = self.resource_path(id.as_str(), path)?;
        if file.is_dir() {
            return Err(RepositoryError::InvalidResourcePath(path.to_string()));
        }
        files::write_atomic(&file, data)?;
        debug!(id = %id, path, bytes = data.len(), "stored resource");
        self.touch(&mut index, &id)
    }

    /// Delete a resource file, pruning directories it leaves empty.
    pub fn delete_resource(&self, id: &str, path: &str) -> Result<(), RepositoryError> {
        let mut index = self.index.write();
        let id = resolve(&index, id)?;
        let file = self.resource_path(id.as_str(), path)?;
        if !file.is_file() {
            return Err(RepositoryError::ResourceNotFound(path.to_string()));
        }
        files::remove_and_prune(&self.layout.resources_dir(id.as_str()), &file)?;
        debug!(id = %id, path, "deleted resource");
        self.touch(&mut index, &id)
    }

    fn resource_path(&self, id: &str, path: &str) -> Result<PathBuf, RepositoryError> {
        Ok(self.layout.resources_dir(id).join(files::check_relative(path)?))
    }
}
