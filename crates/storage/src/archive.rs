// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Portable application archives: a zstd-compressed DMI envelope holding
//! an [`ApplicationArchive`].

use dmi_core::ApplicationArchive;
use dmi_wire::{decode_as, encode_object, ProtocolVersion};

use crate::error::RepositoryError;

const COMPRESSION_LEVEL: i32 = 3;

/// zstd frame magic, little-endian on disk.
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

pub fn pack(archive: &ApplicationArchive, version: ProtocolVersion) -> Result<Vec<u8>, RepositoryError> {
    let envelope = encode_object(archive, version)?;
    Ok(zstd::stream::encode_all(&envelope[..], COMPRESSION_LEVEL)?)
}

pub fn unpack(bytes: &[u8]) -> Result<ApplicationArchive, RepositoryError> {
    let (_, archive) = decode_as::<ApplicationArchive>(inflate(bytes)?)?;
    Ok(archive)
}

/// Decompress a packed archive back to its DMI envelope without decoding it.
pub fn inflate(bytes: &[u8]) -> Result<Vec<u8>, RepositoryError> {
    zstd::stream::decode_all(bytes).map_err(RepositoryError::BadArchive)
}

/// Whether `bytes` start like a packed archive rather than a bare envelope.
pub fn is_packed(bytes: &[u8]) -> bool {
    bytes.starts_with(&ZSTD_MAGIC)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
