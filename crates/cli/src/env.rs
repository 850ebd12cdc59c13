// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

/// `dmictl --version`: crate version plus the git commit it was built from
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

/// Config file override (`DMI_CONFIG`)
pub fn config_path() -> Option<PathBuf> {
    non_empty("DMI_CONFIG").map(PathBuf::from)
}

/// Repository override (`DMI_REPOSITORY`)
pub fn repository() -> Option<PathBuf> {
    non_empty("DMI_REPOSITORY").map(PathBuf::from)
}

/// Log filter directive (`DMI_LOG`), e.g. `dmi_storage=debug`
pub fn log_filter() -> Option<String> {
    non_empty("DMI_LOG")
}

/// Default config location: `<config_dir>/dmi/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dmi").join("config.toml"))
}

/// Default repository location: `<data_dir>/dmi/repository`
pub fn default_repository() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("dmi").join("repository"))
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
