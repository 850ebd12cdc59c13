// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use std::fmt;

use crate::codec::{DmiReader, DmiWriter};
use crate::error::WireError;

/// Wire identifier of a DMI object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeTag(pub u16);

impl TypeTag {
    pub const APPLICATION: TypeTag = TypeTag(1);
    pub const SERVICE_INSTANCE: TypeTag = TypeTag(2);
    pub const PORT: TypeTag = TypeTag(3);
    pub const ROUTE: TypeTag = TypeTag(4);
    pub const SERVICE_STATUS: TypeTag = TypeTag(5);
    pub const APPLICATION_STATUS: TypeTag = TypeTag(6);
    pub const PEER_SERVER: TypeTag = TypeTag(7);
    pub const CONFIG_PROPERTY: TypeTag = TypeTag(8);
    pub const PRINCIPAL: TypeTag = TypeTag(9);
    pub const KEY_STORE_ENTRY: TypeTag = TypeTag(10);
    pub const ARCHIVE: TypeTag = TypeTag(11);
    pub const OBJECT_LIST: TypeTag = TypeTag(12);

    /// Registered name of the type, if any.
    pub fn name(self) -> Option<&'static str> {
        crate::registry::lookup(self).map(|e| e.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}({})", name, self.0),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// An object with a fixed binary layout.
///
/// `write_body` and `read_body` must visit the same fields in the same
/// order, and gate fields on [`DmiWriter::since`]/[`DmiReader::since`]
/// with the same version so that bodies written at any supported version
/// read back at that version.
pub trait DmiObject: Sized {
    const TAG: TypeTag;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError>;

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError>;
}
