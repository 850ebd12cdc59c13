// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use dmi_core::{ConfigProperty, KeyStoreEntry, SecurityPrincipal};

use crate::codec::{DmiReader, DmiWriter};
use crate::error::WireError;
use crate::object::{DmiObject, TypeTag};
use crate::version::ProtocolVersion as V;

impl DmiObject for ConfigProperty {
    const TAG: TypeTag = TypeTag::CONFIG_PROPERTY;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(&self.name)?;
        w.put_str(&self.value)?;
        w.put_enum(self.kind);
        w.put_bool(self.read_only);
        if w.since(V::V2) {
            w.put_opt_str(self.description.as_deref())?;
        }
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        Ok(ConfigProperty {
            name: r.get_str()?,
            value: r.get_str()?,
            kind: r.get_enum()?,
            read_only: r.get_bool()?,
            description: if r.since(V::V2) { r.get_opt_str()? } else { None },
        })
    }
}

impl DmiObject for SecurityPrincipal {
    const TAG: TypeTag = TypeTag::PRINCIPAL;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(&self.name)?;
        w.put_enum(self.kind);
        w.put_strings(&self.roles)?;
        w.put_bool(self.enabled);
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        Ok(SecurityPrincipal {
            name: r.get_str()?,
            kind: r.get_enum()?,
            roles: r.get_strings()?,
            enabled: r.get_bool()?,
        })
    }
}

impl DmiObject for KeyStoreEntry {
    const TAG: TypeTag = TypeTag::KEY_STORE_ENTRY;

    fn write_body(&self, w: &mut DmiWriter) -> Result<(), WireError> {
        w.put_str(&self.alias)?;
        w.put_enum(self.kind);
        w.put_opt_str(self.subject.as_deref())?;
        w.put_i64(self.not_after_ms);
        if w.since(V::V3) {
            w.put_opt_str(self.fingerprint.as_deref())?;
        }
        Ok(())
    }

    fn read_body(r: &mut DmiReader) -> Result<Self, WireError> {
        Ok(KeyStoreEntry {
            alias: r.get_str()?,
            kind: r.get_enum()?,
            subject: r.get_opt_str()?,
            not_after_ms: r.get_i64()?,
            fingerprint: if r.since(V::V3) { r.get_opt_str()? } else { None },
        })
    }
}
