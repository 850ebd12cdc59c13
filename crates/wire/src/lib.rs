// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DMI binary protocol.
//!
//! Envelope: 2-byte magic + 2-byte protocol version + 2-byte type tag + body
//! (all big-endian). Bodies are fixed sequences of primitive fields whose
//! presence depends on the protocol version negotiated with the peer.
//!
//! Transport: 4-byte length prefix (big-endian) + envelope.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod codec;
mod envelope;
mod error;
mod frame;
mod handshake;
mod object;
mod objects;
pub mod registry;
mod version;

pub use codec::{DmiReader, DmiWriter, WireEnum, MAX_BYTES_LEN, MAX_DEPTH};
pub use envelope::{decode, decode_as, encode, encode_object, peek_header, Envelope, MAGIC};
pub use error::WireError;
pub use frame::{read_frame, read_object, write_frame, write_object, ProtocolError, MAX_FRAME_SIZE};
pub use handshake::{client_handshake, server_handshake};
pub use object::{DmiObject, TypeTag};
pub use registry::{DmiValue, ObjectList};
pub use version::{ProtocolVersion, VersionRange};
