// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Objects exchanged by the configuration, security and key-store
//! management surfaces.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    #[default]
    String,
    Integer,
    Boolean,
    Path,
    /// Value is a credential and is never displayed
    Secret,
}

crate::simple_display! {
    PropertyKind {
        String => "string",
        Integer => "integer",
        Boolean => "boolean",
        Path => "path",
        Secret => "secret",
    }
}

/// A single server configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProperty {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub kind: PropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub read_only: bool,
}

impl ConfigProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: PropertyKind) -> Self {
        Self { name: name.into(), value: value.into(), kind, description: None, read_only: false }
    }

    /// Value as shown to operators (secrets masked).
    pub fn display_value(&self) -> &str {
        match self.kind {
            PropertyKind::Secret => "********",
            _ => &self.value,
        }
    }
}

impl fmt::Display for ConfigProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.display_value())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    #[default]
    User,
    Group,
}

crate::simple_display! {
    PrincipalKind {
        User => "user",
        Group => "group",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityPrincipal {
    pub name: String,
    #[serde(default)]
    pub kind: PrincipalKind,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub enabled: bool,
}

impl SecurityPrincipal {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyEntryKind {
    PrivateKey,
    TrustedCertificate,
    SecretKey,
}

crate::simple_display! {
    KeyEntryKind {
        PrivateKey => "private-key",
        TrustedCertificate => "trusted-certificate",
        SecretKey => "secret-key",
    }
}

/// Metadata for one key-store entry. Key material never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStoreEntry {
    pub alias: String,
    pub kind: KeyEntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Certificate expiry in epoch ms; 0 when the entry does not expire
    #[serde(default)]
    pub not_after_ms: i64,
    /// SHA-256 fingerprint, colon separated hex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl KeyStoreEntry {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.not_after_ms > 0 && self.not_after_ms <= now_ms
    }
}

#[cfg(test)]
#[path = "management_tests.rs"]
mod tests;
