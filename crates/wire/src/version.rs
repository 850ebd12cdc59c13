// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol versions and version negotiation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the DMI body layout spoken on a connection or stored on disk.
///
/// - `V1`: base layout
/// - `V2`: descriptions, categories, service parameters, route selectors,
///   port content types, status error messages
/// - `V3`: timestamps, last error, peer placement, route transformations,
///   server roles, key fingerprints
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(u16);

impl ProtocolVersion {
    pub const V1: ProtocolVersion = ProtocolVersion(1);
    pub const V2: ProtocolVersion = ProtocolVersion(2);
    pub const V3: ProtocolVersion = ProtocolVersion(3);

    pub const MIN_SUPPORTED: ProtocolVersion = Self::V1;
    pub const CURRENT: ProtocolVersion = Self::V3;

    /// Wrap a raw version number without checking support.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    pub fn is_supported(self) -> bool {
        VersionRange::SUPPORTED.contains(self)
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Inclusive range of versions a peer can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    pub min: ProtocolVersion,
    pub max: ProtocolVersion,
}

impl VersionRange {
    /// Everything this build can encode and decode.
    pub const SUPPORTED: VersionRange =
        VersionRange { min: ProtocolVersion::MIN_SUPPORTED, max: ProtocolVersion::CURRENT };

    pub fn new(min: ProtocolVersion, max: ProtocolVersion) -> Self {
        Self { min, max }
    }

    /// Pin a connection to exactly one version.
    pub fn exactly(version: ProtocolVersion) -> Self {
        Self { min: version, max: version }
    }

    pub fn contains(&self, version: ProtocolVersion) -> bool {
        self.min <= version && version <= self.max
    }

    /// Highest version both ranges contain.
    pub fn negotiate(&self, remote: &VersionRange) -> Option<ProtocolVersion> {
        let high = self.max.min(remote.max);
        let low = self.min.max(remote.min);
        (high >= low).then_some(high)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
