//! IFD entries: the fixed-width records of a directory.
//!
//! ```text
//! Classic (12 bytes): tag u16 | type u16 | count u32 | value/offset [4]
//! BigTIFF (20 bytes): tag u16 | type u16 | count u64 | value/offset [8]
//! ```

use super::parser::Layout;
use crate::error::TiffError;
use crate::io::{ByteOrder, ByteReader};

/// One on-disk IFD entry, before its value is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    tag_id: u16,
    type_id: u16,
    count: u64,
    /// Value or offset, left-justified. Only the first
    /// [`Layout::inline_capacity`] bytes are meaningful.
    value_offset: [u8; 8],
    layout: Layout,
}

impl Entry {
    /// Read an entry at the reader's cursor.
    pub fn parse(reader: &mut ByteReader, layout: Layout) -> Result<Self, TiffError> {
        let tag_id = reader.read_u16()?;
        let type_id = reader.read_u16()?;

        let mut value_offset = [0u8; 8];
        let count = match layout {
            Layout::Classic => {
                let count = reader.read_u32()? as u64;
                value_offset[..4].copy_from_slice(&reader.read_array::<4>()?);
                count
            }
            Layout::Big => {
                let count = reader.read_u64()?;
                value_offset = reader.read_array::<8>()?;
                count
            }
        };

        Ok(Self {
            tag_id,
            type_id,
            count,
            value_offset,
            layout,
        })
    }

    #[inline]
    pub fn tag_id(&self) -> u16 {
        self.tag_id
    }

    #[inline]
    pub fn type_id(&self) -> u16 {
        self.type_id
    }

    /// Number of values, not bytes.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The raw value/offset slot.
    pub fn value_bytes(&self) -> &[u8] {
        &self.value_offset[..self.layout.inline_capacity()]
    }

    /// The value/offset slot read as an offset.
    pub fn offset(&self, order: ByteOrder) -> u64 {
        match self.layout {
            Layout::Classic => order.read_u32(self.value_bytes()) as u64,
            Layout::Big => order.read_u64(self.value_bytes()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
