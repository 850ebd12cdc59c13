// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Version handshake run once per connection before any object frames.
//!
//! ```text
//! client -> server: [magic u16][min u16][max u16]
//! server -> client: [magic u16][chosen u16]     chosen = 0: no common version
//! ```

use tokio::io::{AsyncRead, AsyncWrite};

use crate::codec::{DmiReader, DmiWriter};
use crate::envelope::MAGIC;
use crate::error::WireError;
use crate::frame::{read_frame, write_frame, ProtocolError};
use crate::version::{ProtocolVersion, VersionRange};

const REJECTED: u16 = 0;

fn open(frame: Vec<u8>) -> Result<DmiReader, WireError> {
    let mut r = DmiReader::new(frame, ProtocolVersion::V1);
    let magic = r.get_u16()?;
    if magic != MAGIC {
        return Err(WireError::BadMagic(magic));
    }
    Ok(r)
}

/// Offer `local` to the server and return the version it picked.
pub async fn client_handshake<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut S,
    local: VersionRange,
) -> Result<ProtocolVersion, ProtocolError> {
    let mut hello = DmiWriter::new(ProtocolVersion::V1);
    hello.put_u16(MAGIC);
    hello.put_u16(local.min.get());
    hello.put_u16(local.max.get());
    write_frame(stream, &hello.into_bytes()).await?;

    let mut r = open(read_frame(stream).await?)?;
    let chosen = r.get_u16()?;
    r.finish()?;

    if chosen == REJECTED {
        return Err(ProtocolError::NoCommonVersion(local));
    }
    let version = ProtocolVersion::new(chosen);
    if !local.contains(version) {
        return Err(ProtocolError::VersionOutOfRange { chosen, offered: local });
    }
    Ok(version)
}

/// Answer a client's offer with the highest version both sides speak.
pub async fn server_handshake<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut S,
    local: VersionRange,
) -> Result<ProtocolVersion, ProtocolError> {
    let mut r = open(read_frame(stream).await?)?;
    let remote = VersionRange::new(ProtocolVersion::new(r.get_u16()?), ProtocolVersion::new(r.get_u16()?));
    r.finish()?;

    let chosen = local.negotiate(&remote);
    let mut reply = DmiWriter::new(ProtocolVersion::V1);
    reply.put_u16(MAGIC);
    reply.put_u16(chosen.map_or(REJECTED, ProtocolVersion::get));
    write_frame(stream, &reply.into_bytes()).await?;

    chosen.ok_or(ProtocolError::NoCommonVersion(local))
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;
