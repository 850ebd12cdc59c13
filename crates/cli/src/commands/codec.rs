// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dmictl decode` / `dmictl encode`

use std::path::Path;

use anyhow::{Context, Result};
use dmi_storage::archive;
use dmi_wire::{DmiValue, Envelope, ProtocolVersion};
use serde::Serialize;

use crate::definition::read_application;
use crate::output::{format_bytes, OutputFormat};

/// JSON rendering of a decoded file.
#[derive(Serialize)]
struct DecodedJson<'a> {
    version: u16,
    tag: u16,
    compressed: bool,
    #[serde(flatten)]
    value: &'a DmiValue,
}

/// Decode a bare envelope or a packed archive.
///
/// Returns the envelope and whether it had to be decompressed first.
pub fn read_envelope(bytes: &[u8]) -> Result<(Envelope, bool)> {
    if archive::is_packed(bytes) {
        let inner = archive::inflate(bytes)?;
        return Ok((dmi_wire::decode(inner)?, true));
    }
    Ok((dmi_wire::decode(bytes.to_vec())?, false))
}

pub fn decode(file: &Path, format: OutputFormat) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let (envelope, compressed) =
        read_envelope(&bytes).with_context(|| format!("cannot decode {}", file.display()))?;
    let tag = envelope.value.type_tag();

    match format {
        OutputFormat::Json => {
            let json = DecodedJson { version: envelope.version.get(), tag: tag.0, compressed, value: &envelope.value };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            let mut summary = format!("{tag} {}, {}", envelope.version, format_bytes(bytes.len()));
            if compressed {
                summary.push_str(" (compressed)");
            }
            println!("{summary}");
            let value = serde_json::to_value(&envelope.value)?;
            println!("{}", serde_json::to_string_pretty(&value["object"])?);
        }
    }
    Ok(())
}

pub fn encode(definition: &Path, out: &Path, version: ProtocolVersion) -> Result<()> {
    let app = read_application(definition)?;
    app.validate()?;
    let bytes = dmi_wire::encode_object(&app, version)?;
    std::fs::write(out, &bytes).with_context(|| format!("cannot write {}", out.display()))?;
    println!(
        "Wrote '{}' as {version} to {} ({})",
        app.name,
        out.display(),
        format_bytes(bytes.len())
    );
    Ok(())
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
