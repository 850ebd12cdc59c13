// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefixed framing for DMI envelopes on a byte stream.

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::envelope::{self, Envelope};
use crate::error::WireError;
use crate::registry::DmiValue;
use crate::version::{ProtocolVersion, VersionRange};

/// Maximum frame payload (16 MiB)
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed")]
    ConnectionClosed,

    #[error("message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("peer shares no protocol version with {0}")]
    NoCommonVersion(VersionRange),

    #[error("peer chose protocol version {chosen}, outside {offered}")]
    VersionOutOfRange { chosen: u16, offered: VersionRange },
}

/// Write a 4-byte big-endian length prefix followed by `data`.
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
) -> Result<(), ProtocolError> {
    if data.len() > MAX_FRAME_SIZE {
        return Err(ProtocolError::MessageTooLarge { size: data.len(), max: MAX_FRAME_SIZE });
    }
    let len = data.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed frame.
///
/// End of stream before the length prefix is `ConnectionClosed`; end of
/// stream inside a frame is an I/O error.
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::ConnectionClosed)
        }
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_SIZE {
        return Err(ProtocolError::MessageTooLarge { size: len, max: MAX_FRAME_SIZE });
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer).await?;
    Ok(buffer)
}

/// Send one object as an envelope in a single frame.
pub async fn write_object<W: AsyncWrite + Unpin>(
    writer: &mut W,
    value: &DmiValue,
    version: ProtocolVersion,
) -> Result<(), ProtocolError> {
    let bytes = envelope::encode(value, version)?;
    write_frame(writer, &bytes).await
}

pub async fn read_object<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Envelope, ProtocolError> {
    let frame = read_frame(reader).await?;
    Ok(envelope::decode(frame)?)
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
