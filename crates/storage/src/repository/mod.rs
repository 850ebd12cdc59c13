// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application repository: one directory per installed application.

mod resources;
mod transfer;

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use dmi_core::{
    Application, ApplicationId, ApplicationState, Clock, LifecycleAction, SystemClock,
};
use dmi_wire::{decode_as, encode_object, ProtocolVersion};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::RepositoryError;
use crate::files;
use crate::layout::{self, Layout, STAGING_SUFFIX};

type Index = HashMap<ApplicationId, Application>;

/// Installed applications under a locked root directory.
///
/// The in-memory index mirrors `applications/*/application.dmi`. Mutations
/// hold the index write lock across their filesystem work, so operations on
/// one repository handle are serialized; other processes are kept out by
/// the `.lock` file.
pub struct ApplicationRepository<C: Clock = SystemClock> {
    layout: Layout,
    clock: C,
    index: RwLock<Index>,
    _lock: File,
}

impl<C: Clock> ApplicationRepository<C> {
    /// Open (creating if needed) the repository at `root`.
    pub fn open(root: impl Into<PathBuf>, clock: C) -> Result<Self, RepositoryError> {
        let layout = Layout::new(root);
        let lock = layout.create_and_lock()?;
        sweep_staging(&layout)?;
        let index = load_index(&layout)?;
        info!(root = %layout.root().display(), applications = index.len(), "opened repository");
        Ok(Self { layout, clock, index: RwLock::new(index), _lock: lock })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    /// All applications, sorted by name.
    pub fn list(&self) -> Vec<Application> {
        let mut apps: Vec<Application> = self.index.read().values().cloned().collect();
        apps.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        apps
    }

    /// Look up by exact id or unique id prefix.
    pub fn get(&self, id: &str) -> Option<Application> {
        let index = self.index.read();
        resolve(&index, id).ok().and_then(|id| index.get(&id).cloned())
    }

    pub fn find_by_name(&self, name: &str) -> Option<Application> {
        self.index.read().values().find(|a| a.name == name).cloned()
    }

    /// Install a new application, copying `resources` (if given) into its
    /// resource tree. The stored copy starts `Installed` with fresh timestamps.
    pub fn add(
        &self,
        mut app: Application,
        resources: Option<&Path>,
    ) -> Result<Application, RepositoryError> {
        layout::check_id(app.id.as_str())?;
        app.validate()?;
        let mut index = self.index.write();
        if index.contains_key(&app.id) {
            return Err(RepositoryError::AlreadyExists(app.id.to_string()));
        }
        ensure_unique_name(&index, &app.name, None)?;

        let now = self.clock.epoch_ms();
        app.state = ApplicationState::Installed;
        app.last_error = None;
        app.created_ms = now;
        app.modified_ms = now;

        self.install(&app, |dir| match resources {
            Some(src) => {
                let copied = files::copy_tree(src, dir)?;
                debug!(from = %src.display(), files = copied, "copied resources");
                Ok(())
            }
            None => Ok(()),
        })?;

        info!(id = %app.id, name = %app.name, "installed application");
        index.insert(app.id.clone(), app.clone());
        Ok(app)
    }

    /// Replace the definition of an existing application.
    ///
    /// Lifecycle state, last error and creation time are kept from the
    /// stored copy; they only change through [`Self::apply`].
    pub fn update(&self, mut app: Application) -> Result<Application, RepositoryError> {
        layout::check_id(app.id.as_str())?;
        app.validate()?;
        let mut index = self.index.write();
        let stored =
            index.get(&app.id).ok_or_else(|| RepositoryError::NotFound(app.id.to_string()))?;
        ensure_unique_name(&index, &app.name, Some(&app.id))?;

        app.state = stored.state;
        app.last_error = stored.last_error.clone();
        app.created_ms = stored.created_ms;
        app.modified_ms = self.clock.epoch_ms();

        self.persist(&app)?;
        info!(id = %app.id, name = %app.name, "updated application");
        index.insert(app.id.clone(), app.clone());
        Ok(app)
    }

    /// Run a lifecycle transition and persist the new state.
    pub fn apply(
        &self,
        id: &str,
        action: &LifecycleAction,
    ) -> Result<ApplicationState, RepositoryError> {
        let mut index = self.index.write();
        let id = resolve(&index, id)?;
        let mut app = index.get(&id).cloned().ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        let from = app.state;
        let next = app.apply(action)?;
        app.modified_ms = self.clock.epoch_ms();

        self.persist(&app)?;
        info!(id = %app.id, action = action.name(), %from, to = %next, "state change");
        index.insert(id, app);
        Ok(next)
    }

    /// Delete an application and its resources.
    ///
    /// Active applications (launching, running, stopping) are refused unless `force`.
    pub fn remove(&self, id: &str, force: bool) -> Result<Application, RepositoryError> {
        let mut index = self.index.write();
        let id = resolve(&index, id)?;
        let state = index.get(&id).map(|a| a.state).unwrap_or_default();
        if state.is_active() && !force {
            return Err(RepositoryError::Busy { id: id.to_string(), state });
        }

        // Park the directory first so a crash mid-delete leaves only staging debris.
        let retired = self.layout.retired_dir(id.as_str());
        fs::rename(self.layout.app_dir(id.as_str()), &retired)?;
        fs::remove_dir_all(&retired)?;

        let app = index.remove(&id).ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        info!(id = %app.id, name = %app.name, force, "removed application");
        Ok(app)
    }

    /// Install a copy of an application (fresh ids, `Installed`) under `new_name`,
    /// including its resource tree.
    pub fn duplicate(&self, id: &str, new_name: &str) -> Result<Application, RepositoryError> {
        let mut index = self.index.write();
        let id = resolve(&index, id)?;
        let source = index.get(&id).ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        ensure_unique_name(&index, new_name, None)?;

        let mut copy = source.duplicate(new_name);
        copy.validate()?;
        let now = self.clock.epoch_ms();
        copy.created_ms = now;
        copy.modified_ms = now;

        let src = self.layout.resources_dir(id.as_str());
        self.install(&copy, |dir| {
            if src.is_dir() {
                files::copy_tree(&src, dir)?;
            }
            Ok(())
        })?;

        info!(id = %copy.id, name = %copy.name, source = %id, "duplicated application");
        index.insert(copy.id.clone(), copy.clone());
        Ok(copy)
    }

    /// Assemble an application directory under a staging name and move it
    /// into place, replacing any existing directory for the same id.
    fn install(
        &self,
        app: &Application,
        fill_resources: impl FnOnce(&Path) -> Result<(), RepositoryError>,
    ) -> Result<(), RepositoryError> {
        let id = app.id.as_str();
        let staging = self.layout.staging_dir(id);
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }

        let staged = (|| -> Result<(), RepositoryError> {
            fs::create_dir_all(&staging)?;
            let bytes = encode_object(app, ProtocolVersion::CURRENT)?;
            fs::write(layout::definition_in(&staging), &bytes)?;
            let resources = layout::resources_in(&staging);
            fs::create_dir_all(&resources)?;
            fill_resources(&resources)
        })();
        if let Err(e) = staged {
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }

        let target = self.layout.app_dir(id);
        if target.exists() {
            let retired = self.layout.retired_dir(id);
            fs::rename(&target, &retired)?;
            fs::rename(&staging, &target)?;
            fs::remove_dir_all(&retired)?;
        } else {
            fs::rename(&staging, &target)?;
        }
        Ok(())
    }

    /// Rewrite the definition file of an installed application.
    fn persist(&self, app: &Application) -> Result<(), RepositoryError> {
        let bytes = encode_object(app, ProtocolVersion::CURRENT)?;
        files::write_atomic(&self.layout.definition_path(app.id.as_str()), &bytes)?;
        Ok(())
    }

    /// Bump `modified_ms` and persist, after a change to the resource tree.
    fn touch(&self, index: &mut Index, id: &ApplicationId) -> Result<(), RepositoryError> {
        let app = index.get_mut(id).ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        app.modified_ms = self.clock.epoch_ms();
        let app = app.clone();
        self.persist(&app)
    }
}

/// Resolve an exact id or a unique prefix. Ambiguous prefixes do not resolve.
fn resolve(index: &Index, query: &str) -> Result<ApplicationId, RepositoryError> {
    if let Some((id, _)) = index.get_key_value(query) {
        return Ok(id.clone());
    }
    let mut matches = index.keys().filter(|id| id.matches_prefix(query));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id.clone()),
        _ => Err(RepositoryError::NotFound(query.to_string())),
    }
}

fn ensure_unique_name(
    index: &Index,
    name: &str,
    except: Option<&ApplicationId>,
) -> Result<(), RepositoryError> {
    let taken = index.values().any(|a| a.name == name && Some(&a.id) != except);
    if taken {
        return Err(RepositoryError::DuplicateName(name.to_string()));
    }
    Ok(())
}

/// Remove staging and retired directories left by an interrupted operation.
fn sweep_staging(layout: &Layout) -> Result<(), RepositoryError> {
    for entry in fs::read_dir(layout.applications_dir())? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().ends_with(STAGING_SUFFIX) && entry.file_type()?.is_dir() {
            warn!(path = %entry.path().display(), "removing leftover staging directory");
            fs::remove_dir_all(entry.path())?;
        }
    }
    Ok(())
}

/// Load every application definition. Unreadable entries are logged and skipped.
fn load_index(layout: &Layout) -> Result<Index, RepositoryError> {
    let mut index = Index::new();
    for entry in fs::read_dir(layout.applications_dir())? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let path = layout::definition_in(&entry.path());
        match load_definition(&path) {
            Ok(app) => {
                if app.id.as_str() != entry.file_name().to_string_lossy() {
                    warn!(path = %path.display(), id = %app.id, "definition id does not match its directory, skipping");
                    continue;
                }
                index.insert(app.id.clone(), app);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable application"),
        }
    }
    Ok(index)
}

fn load_definition(path: &Path) -> Result<Application, RepositoryError> {
    let bytes = fs::read(path)?;
    let (_, app) = decode_as::<Application>(bytes)
        .map_err(|source| RepositoryError::Corrupt { path: path.to_path_buf(), source })?;
    Ok(app)
}

#[cfg(test)]
#[path = "../repository_tests/mod.rs"]
mod tests;
