// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Export and import of whole applications as archives.

use std::fs;

use dmi_core::{Application, ApplicationArchive, ApplicationState, ArchiveEntry, Clock};
use dmi_wire::ProtocolVersion;
use tracing::info;

use super::{ensure_unique_name, resolve, ApplicationRepository};
use crate::archive;
use crate::error::RepositoryError;
use crate::files;
use crate::layout;

impl<C: Clock> ApplicationRepository<C> {
    /// Bundle an application's definition and resource files.
    pub fn export_archive(&self, id: &str) -> Result<Vec<u8>, RepositoryError> {
        let index = self.index.read();
        let id = resolve(&index, id)?;
        let application =
            index.get(&id).cloned().ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let resources_dir = self.layout.resources_dir(id.as_str());
        let mut entries = Vec::new();
        for path in files::list_files(&resources_dir)? {
            let data = fs::read(resources_dir.join(&path))?;
            entries.push(ArchiveEntry { path, data });
        }

        let archive = ApplicationArchive { application, entries };
        let bytes = archive::pack(&archive, ProtocolVersion::CURRENT)?;
        info!(id = %id, files = archive.entries.len(), bytes = bytes.len(), "exported application");
        Ok(bytes)
    }

    /// Install an exported application under its original id.
    ///
    /// An application with the same id is replaced only when `replace` is set
    /// and it is not active. The imported copy starts `Installed`.
    pub fn import_archive(
        &self,
        bytes: &[u8],
        replace: bool,
    ) -> Result<Application, RepositoryError> {
        let ApplicationArchive { mut application, entries } = archive::unpack(bytes)?;
        layout::check_id(application.id.as_str())?;
        application.validate()?;
        let mut paths = Vec::with_capacity(entries.len());
        for entry in &entries {
            paths.push(files::check_relative(&entry.path)?);
        }

        let mut index = self.index.write();
        let previous_created = match index.get(&application.id) {
            Some(_) if !replace => {
                return Err(RepositoryError::AlreadyExists(application.id.to_string()))
            }
            Some(app) if app.state.is_active() => {
                return Err(RepositoryError::Busy { id: app.id.to_string(), state: app.state })
            }
            Some(app) => Some(app.created_ms),
            None => None,
        };
        ensure_unique_name(&index, &application.name, Some(&application.id))?;

        let now = self.clock.epoch_ms();
        application.state = ApplicationState::Installed;
        application.last_error = None;
        application.created_ms = previous_created.unwrap_or(now);
        application.modified_ms = now;

        self.install(&application, |dir| {
            for (path, entry) in paths.iter().zip(&entries) {
                files::write_atomic(&dir.join(path), &entry.data)?;
            }
            Ok(())
        })?;

        info!(
            id = %application.id,
            name = %application.name,
            files = entries.len(),
            replaced = previous_created.is_some(),
            "imported application"
        );
        index.insert(application.id.clone(), application.clone());
        Ok(application)
    }
}
