// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Primitive field encoding shared by every DMI object.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use indexmap::IndexMap;

use crate::error::WireError;
use crate::object::DmiObject;
use crate::registry::{self, DmiValue};
use crate::version::ProtocolVersion;

/// Largest byte array accepted in a single field (64 MiB).
pub const MAX_BYTES_LEN: usize = 64 * 1024 * 1024;

/// Deepest nesting of tagged objects inside one another.
pub const MAX_DEPTH: usize = 32;

/// Fieldless enums carried as a single byte.
pub trait WireEnum: Sized + Copy {
    /// Name used in decode errors
    const KIND: &'static str;

    fn code(self) -> u8;

    fn from_code(code: u8) -> Option<Self>;
}

/// Serializes object bodies for one protocol version.
pub struct DmiWriter {
    buf: BytesMut,
    version: ProtocolVersion,
    depth: usize,
}

impl DmiWriter {
    pub fn new(version: ProtocolVersion) -> Self {
        Self { buf: BytesMut::new(), version, depth: 0 }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Whether fields introduced in `version` are written.
    pub fn since(&self, version: ProtocolVersion) -> bool {
        self.version >= version
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn put_bool(&mut self, v: bool) {
        self.buf.put_u8(u8::from(v));
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn put_u16(&mut self, v: u16) {
        self.buf.put_u16(v);
    }

    pub fn put_i32(&mut self, v: i32) {
        self.buf.put_i32(v);
    }

    pub fn put_i64(&mut self, v: i64) {
        self.buf.put_i64(v);
    }

    pub fn put_u64(&mut self, v: u64) {
        self.buf.put_u64(v);
    }

    pub fn put_f64(&mut self, v: f64) {
        self.buf.put_f64(v);
    }

    /// u16 byte length + UTF-8.
    pub fn put_str(&mut self, s: &str) -> Result<(), WireError> {
        let len = u16::try_from(s.len()).map_err(|_| WireError::StringTooLong(s.len()))?;
        self.buf.put_u16(len);
        self.buf.put_slice(s.as_bytes());
        Ok(())
    }

    pub fn put_opt_str(&mut self, s: Option<&str>) -> Result<(), WireError> {
        self.put_bool(s.is_some());
        match s {
            Some(s) => self.put_str(s),
            None => Ok(()),
        }
    }

    /// u32 length + raw bytes.
    pub fn put_bytes(&mut self, data: &[u8]) -> Result<(), WireError> {
        if data.len() > MAX_BYTES_LEN {
            return Err(WireError::BytesTooLong { len: data.len(), max: MAX_BYTES_LEN });
        }
        self.put_len(data.len())?;
        self.buf.put_slice(data);
        Ok(())
    }

    fn put_len(&mut self, len: usize) -> Result<(), WireError> {
        let len = u32::try_from(len).map_err(|_| WireError::LengthOverflow(len))?;
        self.buf.put_u32(len);
        Ok(())
    }

    /// u32 count followed by each element.
    pub fn put_list<T>(
        &mut self,
        items: &[T],
        mut put: impl FnMut(&mut Self, &T) -> Result<(), WireError>,
    ) -> Result<(), WireError> {
        self.put_len(items.len())?;
        for item in items {
            put(self, item)?;
        }
        Ok(())
    }

    pub fn put_strings(&mut self, items: &[String]) -> Result<(), WireError> {
        self.put_list(items, |w, s| w.put_str(s))
    }

    /// u32 count + key/value string pairs in insertion order.
    pub fn put_map(&mut self, map: &IndexMap<String, String>) -> Result<(), WireError> {
        self.put_len(map.len())?;
        for (key, value) in map {
            self.put_str(key)?;
            self.put_str(value)?;
        }
        Ok(())
    }

    pub fn put_enum<E: WireEnum>(&mut self, value: E) {
        self.buf.put_u8(value.code());
    }

    /// Untagged body of a statically known type.
    pub fn put_object<T: DmiObject>(&mut self, object: &T) -> Result<(), WireError> {
        object.write_body(self)
    }

    pub fn put_objects<T: DmiObject>(&mut self, objects: &[T]) -> Result<(), WireError> {
        self.put_list(objects, |w, o| o.write_body(w))
    }

    pub fn put_opt_object<T: DmiObject>(&mut self, object: Option<&T>) -> Result<(), WireError> {
        self.put_bool(object.is_some());
        match object {
            Some(o) => o.write_body(self),
            None => Ok(()),
        }
    }

    /// Type tag followed by the body, for fields that may hold any type.
    pub fn put_tagged(&mut self, value: &DmiValue) -> Result<(), WireError> {
        if self.depth >= MAX_DEPTH {
            return Err(WireError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        self.buf.put_u16(value.type_tag().0);
        let result = value.write_body(self);
        self.depth -= 1;
        result
    }
}

/// Deserializes object bodies written at a known protocol version.
pub struct DmiReader {
    buf: Bytes,
    version: ProtocolVersion,
    depth: usize,
}

impl DmiReader {
    pub fn new(buf: impl Into<Bytes>, version: ProtocolVersion) -> Self {
        Self { buf: buf.into(), version, depth: 0 }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Whether fields introduced in `version` are present.
    pub fn since(&self, version: ProtocolVersion) -> bool {
        self.version >= version
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub(crate) fn take_rest(&mut self) -> Bytes {
        std::mem::take(&mut self.buf)
    }

    /// Fail unless the whole buffer was consumed.
    pub fn finish(self) -> Result<(), WireError> {
        match self.buf.remaining() {
            0 => Ok(()),
            n => Err(WireError::TrailingBytes(n)),
        }
    }

    fn ensure(&self, needed: usize) -> Result<(), WireError> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(WireError::UnexpectedEof { needed, remaining });
        }
        Ok(())
    }

    pub fn get_bool(&mut self) -> Result<bool, WireError> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(WireError::InvalidBool(other)),
        }
    }

    pub fn get_u8(&mut self) -> Result<u8, WireError> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn get_u16(&mut self) -> Result<u16, WireError> {
        self.ensure(2)?;
        Ok(self.buf.get_u16())
    }

    pub fn get_i32(&mut self) -> Result<i32, WireError> {
        self.ensure(4)?;
        Ok(self.buf.get_i32())
    }

    pub fn get_i64(&mut self) -> Result<i64, WireError> {
        self.ensure(8)?;
        Ok(self.buf.get_i64())
    }

    pub fn get_u64(&mut self) -> Result<u64, WireError> {
        self.ensure(8)?;
        Ok(self.buf.get_u64())
    }

    pub fn get_f64(&mut self) -> Result<f64, WireError> {
        self.ensure(8)?;
        Ok(self.buf.get_f64())
    }

    pub fn get_str(&mut self) -> Result<String, WireError> {
        let len = usize::from(self.get_u16()?);
        self.ensure(len)?;
        let raw = self.buf.split_to(len);
        String::from_utf8(raw.to_vec()).map_err(|_| WireError::InvalidUtf8)
    }

    pub fn get_opt_str(&mut self) -> Result<Option<String>, WireError> {
        if self.get_bool()? {
            self.get_str().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn get_bytes(&mut self) -> Result<Vec<u8>, WireError> {
        let len = self.get_len()?;
        if len > MAX_BYTES_LEN {
            return Err(WireError::BytesTooLong { len, max: MAX_BYTES_LEN });
        }
        self.ensure(len)?;
        Ok(self.buf.split_to(len).to_vec())
    }

    fn get_len(&mut self) -> Result<usize, WireError> {
        self.ensure(4)?;
        Ok(self.buf.get_u32() as usize)
    }

    /// Element count of a list. Every element occupies at least one byte,
    /// so counts beyond the remaining input are rejected before allocating.
    fn get_count(&mut self) -> Result<usize, WireError> {
        let count = self.get_len()?;
        self.ensure(count)?;
        Ok(count)
    }

    pub fn get_list<T>(
        &mut self,
        mut get: impl FnMut(&mut Self) -> Result<T, WireError>,
    ) -> Result<Vec<T>, WireError> {
        let count = self.get_count()?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(get(self)?);
        }
        Ok(items)
    }

    pub fn get_strings(&mut self) -> Result<Vec<String>, WireError> {
        self.get_list(|r| r.get_str())
    }

    pub fn get_map(&mut self) -> Result<IndexMap<String, String>, WireError> {
        let count = self.get_count()?;
        let mut map = IndexMap::with_capacity(count);
        for _ in 0..count {
            let key = self.get_str()?;
            let value = self.get_str()?;
            map.insert(key, value);
        }
        Ok(map)
    }

    pub fn get_enum<E: WireEnum>(&mut self) -> Result<E, WireError> {
        let code = self.get_u8()?;
        E::from_code(code).ok_or(WireError::InvalidEnum { kind: E::KIND, code })
    }

    pub fn get_object<T: DmiObject>(&mut self) -> Result<T, WireError> {
        T::read_body(self)
    }

    pub fn get_objects<T: DmiObject>(&mut self) -> Result<Vec<T>, WireError> {
        self.get_list(T::read_body)
    }

    pub fn get_opt_object<T: DmiObject>(&mut self) -> Result<Option<T>, WireError> {
        if self.get_bool()? {
            T::read_body(self).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read a type tag and dispatch to the registered decoder.
    pub fn get_tagged(&mut self) -> Result<DmiValue, WireError> {
        if self.depth >= MAX_DEPTH {
            return Err(WireError::TooDeep(MAX_DEPTH));
        }
        let tag = crate::object::TypeTag(self.get_u16()?);
        let entry = registry::lookup(tag).ok_or(WireError::UnknownType(tag))?;
        self.depth += 1;
        let result = entry.decode(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
