// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Self-describing envelope around a single object.

use bytes::Bytes;

use crate::codec::{DmiReader, DmiWriter};
use crate::error::WireError;
use crate::object::{DmiObject, TypeTag};
use crate::registry::{self, DmiValue};
use crate::version::ProtocolVersion;

/// "DM"
pub const MAGIC: u16 = 0x444D;

/// A decoded object plus the version it was written at.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub version: ProtocolVersion,
    pub value: DmiValue,
}

fn header(version: ProtocolVersion, tag: TypeTag) -> Result<DmiWriter, WireError> {
    if !version.is_supported() {
        return Err(WireError::UnsupportedVersion(version.get()));
    }
    let mut w = DmiWriter::new(version);
    w.put_u16(MAGIC);
    w.put_u16(version.get());
    w.put_u16(tag.0);
    Ok(w)
}

/// Encode any registered object at `version`.
pub fn encode(value: &DmiValue, version: ProtocolVersion) -> Result<Bytes, WireError> {
    let mut w = header(version, value.type_tag())?;
    value.write_body(&mut w)?;
    Ok(w.into_bytes())
}

/// Encode a statically typed object at `version`.
pub fn encode_object<T: DmiObject>(object: &T, version: ProtocolVersion) -> Result<Bytes, WireError> {
    let mut w = header(version, T::TAG)?;
    object.write_body(&mut w)?;
    Ok(w.into_bytes())
}

fn open(bytes: Bytes) -> Result<(DmiReader, TypeTag), WireError> {
    // The header is always read with the fixed V1 layout.
    let mut r = DmiReader::new(bytes, ProtocolVersion::V1);
    let magic = r.get_u16()?;
    if magic != MAGIC {
        return Err(WireError::BadMagic(magic));
    }
    let version = ProtocolVersion::new(r.get_u16()?);
    if !version.is_supported() {
        return Err(WireError::UnsupportedVersion(version.get()));
    }
    let tag = TypeTag(r.get_u16()?);
    let body = r.take_rest();
    Ok((DmiReader::new(body, version), tag))
}

/// Read the version and type tag without decoding the body.
pub fn peek_header(bytes: &[u8]) -> Result<(ProtocolVersion, TypeTag), WireError> {
    let header_len = bytes.len().min(6);
    let (r, tag) = open(Bytes::copy_from_slice(&bytes[..header_len]))?;
    Ok((r.version(), tag))
}

/// Decode an envelope, dispatching on its type tag.
pub fn decode(bytes: impl Into<Bytes>) -> Result<Envelope, WireError> {
    let (mut r, tag) = open(bytes.into())?;
    let entry = registry::lookup(tag).ok_or(WireError::UnknownType(tag))?;
    let value = entry.decode(&mut r)?;
    let version = r.version();
    r.finish()?;
    Ok(Envelope { version, value })
}

/// Decode an envelope that must hold a `T`.
pub fn decode_as<T: DmiObject>(bytes: impl Into<Bytes>) -> Result<(ProtocolVersion, T), WireError> {
    let (mut r, tag) = open(bytes.into())?;
    if tag != T::TAG {
        return Err(WireError::UnexpectedType { expected: T::TAG, found: tag });
    }
    let object = T::read_body(&mut r)?;
    let version = r.version();
    r.finish()?;
    Ok((version, object))
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
