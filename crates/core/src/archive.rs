// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Portable bundle of an application definition and its resource files.

use serde::{Deserialize, Serialize};

use crate::application::Application;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Path relative to the application's resource directory, `/` separated
    pub path: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationArchive {
    pub application: Application,
    #[serde(default)]
    pub entries: Vec<ArchiveEntry>,
}

impl ApplicationArchive {
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.data.len()).sum()
    }
}
