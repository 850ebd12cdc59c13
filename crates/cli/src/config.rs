// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `config.toml` loading and setting resolution.
//!
//! Config file: `--config` > `DMI_CONFIG` > `<config_dir>/dmi/config.toml`.
//! Repository: `--repository` > `DMI_REPOSITORY` > `repository` key > `<data_dir>/dmi/repository`.

use std::path::{Path, PathBuf};

use dmi_wire::ProtocolVersion;
use serde::Deserialize;
use thiserror::Error;

use crate::env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("invalid config {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("unsupported protocol_version {0} (supported: {1})")]
    UnsupportedVersion(u16, dmi_wire::VersionRange),

    #[error("no repository configured and no data directory available")]
    NoRepository,
}

/// Contents of `config.toml`; every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Repository root; relative paths resolve against the config file's directory
    pub repository: Option<PathBuf>,
    /// Protocol version used when writing envelopes
    pub protocol_version: Option<u16>,
    /// Log filter directive
    pub log: Option<String>,
}

impl ConfigFile {
    /// Load from an explicit path (`--config` or `DMI_CONFIG`), which must
    /// exist, or from the default location, which may be absent.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit.map(Path::to_path_buf).or_else(env::config_path) {
            return Self::load(&path);
        }
        match env::default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let mut config: ConfigFile = toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        if let (Some(repo), Some(dir)) = (&config.repository, path.parent()) {
            if repo.is_relative() {
                config.repository = Some(dir.join(repo));
            }
        }
        Ok(config)
    }
}

/// Effective settings after applying flags and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub repository: PathBuf,
    pub protocol_version: ProtocolVersion,
    pub log: Option<String>,
}

impl Settings {
    pub fn resolve(file: ConfigFile, repository_flag: Option<PathBuf>) -> Result<Self, ConfigError> {
        let repository = repository_flag
            .or_else(env::repository)
            .or(file.repository)
            .or_else(env::default_repository)
            .ok_or(ConfigError::NoRepository)?;

        let protocol_version = match file.protocol_version {
            Some(raw) => parse_version(raw)?,
            None => ProtocolVersion::CURRENT,
        };

        Ok(Self { repository, protocol_version, log: file.log })
    }
}

/// Accept only versions this build can write.
pub fn parse_version(raw: u16) -> Result<ProtocolVersion, ConfigError> {
    let version = ProtocolVersion::new(raw);
    if !version.is_supported() {
        return Err(ConfigError::UnsupportedVersion(raw, dmi_wire::VersionRange::SUPPORTED));
    }
    Ok(version)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
