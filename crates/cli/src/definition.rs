// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading application definitions from disk.
//!
//! A definition is either JSON or a DMI envelope holding an `Application`
//! (as written by `dmictl encode`).

use std::path::Path;

use anyhow::{Context, Result};
use dmi_core::Application;
use dmi_wire::MAGIC;

pub fn read_application(path: &Path) -> Result<Application> {
    let bytes =
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    parse_application(&bytes).with_context(|| format!("invalid definition {}", path.display()))
}

pub fn parse_application(bytes: &[u8]) -> Result<Application> {
    if bytes.starts_with(&MAGIC.to_be_bytes()) {
        let (_, app) = dmi_wire::decode_as::<Application>(bytes.to_vec())?;
        return Ok(app);
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
