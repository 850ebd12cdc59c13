// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::object::TypeTag;

/// Errors raised while encoding or decoding DMI bodies and envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("unexpected end of stream: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("string of {0} bytes exceeds the 65535 byte limit")]
    StringTooLong(usize),

    #[error("byte array of {len} bytes exceeds the {max} byte limit")]
    BytesTooLong { len: usize, max: usize },

    #[error("length {0} does not fit in 32 bits")]
    LengthOverflow(usize),

    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,

    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    #[error("invalid {kind} code {code}")]
    InvalidEnum { kind: &'static str, code: u8 },

    #[error("unknown DMI type tag {0}")]
    UnknownType(TypeTag),

    #[error("expected {expected} object, found {found}")]
    UnexpectedType { expected: TypeTag, found: TypeTag },

    #[error("objects nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("bad envelope magic {0:#06x}")]
    BadMagic(u16),

    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u16),

    #[error("{0} trailing bytes after object")]
    TrailingBytes(usize),
}
