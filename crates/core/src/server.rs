// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Peer servers that host service instances.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerRole {
    #[default]
    Standalone,
    /// Active member of a high-availability pair
    Primary,
    Backup,
}

crate::simple_display! {
    ServerRole {
        Standalone => "standalone",
        Primary => "primary",
        Backup => "backup",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerServer {
    pub name: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub role: ServerRole,
    #[serde(default)]
    pub available: bool,
}

impl PeerServer {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            version: String::new(),
            role: ServerRole::Standalone,
            available: false,
        }
    }

    /// `host:port` address of the server.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
