//! Field types: the wire encodings of field values.

use std::fmt;

use crate::error::RegistryError;
use crate::format::tiff::Value;
use crate::io::ByteOrder;

use super::set::Registrable;

/// Decodes a whole field payload into a [`Value`].
pub type DecodeFn = fn(&[u8], ByteOrder) -> Value;

/// Renders a single element of a field payload.
pub type ReprFn = fn(&[u8], ByteOrder) -> String;

/// Description of one field type: its id, element size and how to decode it.
#[derive(Clone)]
pub struct FieldType {
    id: u16,
    name: String,
    size: u64,
    signed: bool,
    decode: DecodeFn,
    repr: ReprFn,
}

impl FieldType {
    pub fn new(
        id: u16,
        name: impl Into<String>,
        size: u64,
        signed: bool,
        decode: DecodeFn,
        repr: ReprFn,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            size,
            signed,
            decode,
            repr,
        }
    }

    /// Placeholder for an id no registered set knows about.
    ///
    /// It is one byte wide and decodes to raw bytes, so an unknown type never
    /// stops the rest of a directory from parsing.
    pub fn unknown(id: u16) -> Self {
        Self::new(
            id,
            format!("UNKNOWN_FIELDTYPE_{id}"),
            1,
            false,
            decode_raw,
            repr_raw_byte,
        )
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of one element in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn signed(&self) -> bool {
        self.signed
    }

    /// Decode a full payload (`count * size` bytes).
    pub fn decode(&self, bytes: &[u8], order: ByteOrder) -> Value {
        (self.decode)(bytes, order)
    }

    /// Render one element.
    pub fn repr(&self, element: &[u8], order: ByteOrder) -> String {
        (self.repr)(element, order)
    }

    /// Render every element of a payload.
    pub fn repr_all(&self, bytes: &[u8], order: ByteOrder) -> Vec<String> {
        if self.size == 0 {
            return Vec::new();
        }
        bytes
            .chunks_exact(self.size as usize)
            .map(|element| self.repr(element, order))
            .collect()
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldType")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &self.size)
            .field("signed", &self.signed)
            .finish()
    }
}

impl Registrable for FieldType {
    const KIND: &'static str = "field type";

    fn id(&self) -> u16 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(id: u16) -> Self {
        FieldType::unknown(id)
    }

    fn check_replace(&self, incoming: &Self, set: &str) -> Result<(), RegistryError> {
        if self.name != incoming.name || self.size != incoming.size {
            return Err(RegistryError::FieldTypeConflict {
                set: set.to_string(),
                id: self.id,
                existing: self.name.clone(),
                existing_size: self.size,
                name: incoming.name.clone(),
                size: incoming.size,
            });
        }
        Ok(())
    }
}

fn decode_raw(bytes: &[u8], _: ByteOrder) -> Value {
    Value::Raw(bytes.to_vec())
}

fn repr_raw_byte(element: &[u8], _: ByteOrder) -> String {
    element.first().map(u8::to_string).unwrap_or_default()
}
