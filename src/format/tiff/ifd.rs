//! Image File Directories.
//!
//! ```text
//! Classic: count u16 | count x 12-byte entries | next offset u32
//! BigTIFF: count u64 | count x 20-byte entries | next offset u64
//! ```

use std::collections::HashMap;

use tracing::debug;

use super::convert::FromField;
use super::field::Field;
use super::parser::Layout;
use crate::config::ParseOptions;
use crate::error::TiffError;
use crate::io::ByteReader;
use crate::registry::{FieldTypeSpace, TagSpace};

/// One parsed IFD.
///
/// Fields keep their on-disk order. When a tag appears more than once, lookups
/// by tag return the last occurrence.
#[derive(Debug, Clone)]
pub struct Directory {
    offset: u64,
    layout: Layout,
    entry_count: u64,
    fields: Vec<Field>,
    index: HashMap<u16, usize>,
    next_offset: u64,
}

impl Directory {
    /// Parse the directory at `offset`.
    ///
    /// On success the reader's cursor sits just past the next-IFD offset.
    pub fn parse(
        reader: &mut ByteReader,
        offset: u64,
        layout: Layout,
        tags: &TagSpace,
        types: &FieldTypeSpace,
        options: &ParseOptions,
    ) -> Result<Self, TiffError> {
        reader.seek(offset);
        let entry_count = match layout {
            Layout::Classic => reader.read_u16()? as u64,
            Layout::Big => reader.read_u64()?,
        };

        let too_large = TiffError::DirectoryTooLarge {
            offset,
            entry_count,
        };
        if entry_count > options.max_entry_count {
            return Err(too_large);
        }

        // The whole directory must be addressable and, when the size is
        // known, inside the source.
        let end = layout
            .directory_span(entry_count)
            .and_then(|span| offset.checked_add(span));
        match (end, reader.size()) {
            (None, _) => return Err(too_large),
            (Some(end), Some(size)) if end > size => return Err(too_large),
            _ => {}
        }

        let capacity = entry_count.min(1024) as usize;
        let mut fields = Vec::with_capacity(capacity);
        let mut index = HashMap::with_capacity(capacity);
        for position in 0..entry_count as usize {
            let field = Field::parse(reader, layout, tags, types, options)?;
            index.insert(field.tag_id(), position);
            fields.push(field);
        }

        let next_offset = match layout {
            Layout::Classic => reader.read_u32()? as u64,
            Layout::Big => reader.read_u64()?,
        };

        debug!(
            source = reader.identifier(),
            offset,
            entry_count,
            next_offset,
            tag_space = tags.name(),
            "Parsed IFD"
        );

        Ok(Self {
            offset,
            layout,
            entry_count,
            fields,
            index,
            next_offset,
        })
    }

    /// File offset this directory was parsed from.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    /// Offset of the next directory, 0 at the end of the chain.
    pub fn next_offset(&self) -> u64 {
        self.next_offset
    }

    /// Fields in on-disk order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get_field(&self, tag: u16) -> Option<&Field> {
        self.index.get(&tag).map(|&i| &self.fields[i])
    }

    pub fn has_field(&self, tag: u16) -> bool {
        self.index.contains_key(&tag)
    }

    /// Distinct tag ids in ascending order.
    pub fn tag_ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.index.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Bytes occupied by the directory itself: count, entries and next
    /// offset. Out-of-line values are not included.
    pub fn byte_span(&self) -> u64 {
        self.layout
            .directory_span(self.entry_count)
            .unwrap_or(u64::MAX)
    }

    /// Convert a field if it is present.
    pub fn get<T: FromField>(&self, tag: u16) -> Result<Option<T>, TiffError> {
        self.get_field(tag).map(T::from_field).transpose()
    }

    /// Convert a field that must be present.
    pub fn require<T: FromField>(&self, tag: u16) -> Result<T, TiffError> {
        self.get(tag)?.ok_or(TiffError::MissingTag(tag))
    }
}

// =============================================================================
// Tests
// =============================================================================
