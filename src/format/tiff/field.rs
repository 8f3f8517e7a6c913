//! Fields: entries with their values resolved.
//!
//! A value that fits in the entry's value/offset slot is stored there,
//! left-justified. Anything larger lives elsewhere in the file and the slot
//! holds its offset. Resolution reads those bytes once, so a [`Field`] always
//! carries exactly `count * size` bytes.

use std::fmt;
use std::sync::{Arc, OnceLock};

use bytes::Bytes;
use tracing::trace;

use super::convert::FromField;
use super::entry::Entry;
use super::parser::Layout;
use super::values::Value;
use crate::config::ParseOptions;
use crate::error::TiffError;
use crate::io::{ByteOrder, ByteReader};
use crate::registry::{FieldType, FieldTypeSpace, Tag, TagSpace};

/// Elements shown by the short `Display` form.
const MAX_DISPLAY_ITEMS: usize = 10;

/// Characters shown by the short `Display` form.
const MAX_DISPLAY_CHARS: usize = 40;

/// A directory entry with its value bytes and registry interpretation.
#[derive(Clone)]
pub struct Field {
    entry: Entry,
    tag: Arc<Tag>,
    field_type: Arc<FieldType>,
    bytes: Bytes,
    order: ByteOrder,
    offset: u64,
    decoded: OnceLock<Value>,
}

impl Field {
    /// Parse the entry at the reader's cursor and resolve its value.
    pub fn parse(
        reader: &mut ByteReader,
        layout: Layout,
        tags: &TagSpace,
        types: &FieldTypeSpace,
        options: &ParseOptions,
    ) -> Result<Self, TiffError> {
        let entry = Entry::parse(reader, layout)?;
        Self::resolve(entry, reader, tags, types, options)
    }

    /// Resolve the value of an already parsed entry.
    ///
    /// Out-of-line values are read with a section read, so the reader's
    /// cursor does not move.
    pub fn resolve(
        entry: Entry,
        reader: &ByteReader,
        tags: &TagSpace,
        types: &FieldTypeSpace,
        options: &ParseOptions,
    ) -> Result<Self, TiffError> {
        let tag = tags.get_tag(entry.tag_id());
        let field_type = types.get_field_type(entry.type_id());
        let order = reader.byte_order();

        let too_large = || TiffError::ValueTooLarge {
            tag: entry.tag_id(),
            count: entry.count(),
            type_size: field_type.size(),
        };
        let value_size = entry
            .count()
            .checked_mul(field_type.size())
            .ok_or_else(too_large)?;
        if value_size > options.max_value_size {
            return Err(too_large());
        }

        let (bytes, offset) = if value_size <= entry.layout().inline_capacity() as u64 {
            let inline = &entry.value_bytes()[..value_size as usize];
            (Bytes::copy_from_slice(inline), 0)
        } else {
            let offset = entry.offset(order);
            let bytes = read_value(reader, offset, value_size).map_err(|e| {
                TiffError::ValueRead {
                    tag: entry.tag_id(),
                    offset,
                    source: Box::new(e),
                }
            })?;
            (bytes, offset)
        };

        trace!(
            tag = entry.tag_id(),
            name = tag.name(),
            field_type = field_type.name(),
            count = entry.count(),
            offset,
            "Resolved field"
        );

        Ok(Self {
            entry,
            tag,
            field_type,
            bytes,
            order,
            offset,
            decoded: OnceLock::new(),
        })
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn tag(&self) -> &Arc<Tag> {
        &self.tag
    }

    #[inline]
    pub fn tag_id(&self) -> u16 {
        self.entry.tag_id()
    }

    pub fn field_type(&self) -> &Arc<FieldType> {
        &self.field_type
    }

    /// Number of values.
    #[inline]
    pub fn count(&self) -> u64 {
        self.entry.count()
    }

    /// File offset of the value, or 0 when it is stored inline.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The resolved value bytes, `count * size` long.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// The whole payload decoded by the field type. Decoded once, on first use.
    pub fn value(&self) -> &Value {
        self.decoded
            .get_or_init(|| self.field_type.decode(&self.bytes, self.order))
    }

    /// Every element rendered by the field type's formatter.
    pub fn values_repr(&self) -> Vec<String> {
        self.field_type.repr_all(&self.bytes, self.order)
    }

    /// First value as an unsigned integer.
    pub fn as_u64(&self) -> Option<u64> {
        self.value().first_u64()
    }

    pub fn as_u64_vec(&self) -> Option<Vec<u64>> {
        self.value().as_u64_vec()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value().as_str()
    }

    /// Human-readable rendering from the tag's interpreter, if it has one.
    pub fn interpret(&self) -> Option<String> {
        self.tag.interpret(self)
    }

    /// Convert the value into a Rust type.
    pub fn get<T: FromField>(&self) -> Result<T, TiffError> {
        T::from_field(self)
    }

    fn value_summary(&self, full: bool) -> String {
        if let Value::Ascii(text) = self.value() {
            if !full && text.chars().count() > MAX_DISPLAY_CHARS {
                let head: String = text.chars().take(MAX_DISPLAY_CHARS).collect();
                return format!("{head:?}...");
            }
            return format!("{text:?}");
        }

        let values = self.values_repr();
        if values.len() == 1 {
            return values[0].clone();
        }
        if full {
            return format!("[{}]", values.join(" "));
        }

        let mut shown = Vec::new();
        let mut width = 0;
        for value in values.iter().take(MAX_DISPLAY_ITEMS) {
            width += value.len() + 1;
            if width > MAX_DISPLAY_CHARS && !shown.is_empty() {
                break;
            }
            shown.push(value.as_str());
        }
        let ellipsis = if shown.len() < values.len() { "..." } else { "" };
        format!("[{}]{ellipsis}", shown.join(" "))
    }
}

fn read_value(reader: &ByteReader, offset: u64, len: u64) -> Result<Bytes, TiffError> {
    match (i64::try_from(offset), i64::try_from(len)) {
        (Ok(offset), Ok(len)) => reader.read_section(offset, len),
        _ => Err(TiffError::InvalidSectionBounds {
            offset: offset as i64,
            len: len as i64,
        }),
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("tag", &self.tag.name())
            .field("tag_id", &self.tag_id())
            .field("field_type", &self.field_type.name())
            .field("count", &self.count())
            .field("offset", &self.offset)
            .finish()
    }
}

/// `{}` shortens long values, `{:#}` shows all of them.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Tag: ({:#06x}/{:05}) {}\tType: ({:02}) {}\tCount: {}\tOffset: {}\tValue: {}>",
            self.tag_id(),
            self.tag_id(),
            self.tag.name(),
            self.field_type.id(),
            self.field_type.name(),
            self.count(),
            self.offset,
            self.value_summary(f.alternate())
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
