//! TIFF header parsing and the directory chain walk.
//!
//! # TIFF Header Structure
//!
//! ## Classic TIFF (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes, at least 8)
//! ```
//!
//! ## BigTIFF (16 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (43 = 0x002B)
//! Bytes 4-5: Offset byte size (must be 8)
//! Bytes 6-7: Reserved (expected 0)
//! Bytes 8-15: Offset to first IFD (8 bytes, at least 16)
//! ```
//!
//! After the header, directories form a singly linked list through their
//! next-IFD offsets. The walk stops at offset 0 and refuses to visit an
//! offset twice.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use super::ifd::Directory;
use super::version::VersionRegistry;
use crate::config::ParseOptions;
use crate::error::TiffError;
use crate::io::{ByteOrder, ByteReader, FileReader};
use crate::registry::{Registry, TagSpace};

// =============================================================================
// Layout
// =============================================================================

/// Field widths of a TIFF flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// 32-bit offsets
    Classic,
    /// 64-bit offsets
    Big,
}

impl Layout {
    #[inline]
    pub const fn header_size(self) -> usize {
        match self {
            Layout::Classic => 8,
            Layout::Big => 16,
        }
    }

    /// Size of an IFD entry in bytes.
    ///
    /// Classic TIFF: 12 bytes (2 tag + 2 type + 4 count + 4 value/offset)
    /// BigTIFF: 20 bytes (2 tag + 2 type + 8 count + 8 value/offset)
    #[inline]
    pub const fn entry_size(self) -> usize {
        match self {
            Layout::Classic => 12,
            Layout::Big => 20,
        }
    }

    /// Size of the entry count field at the start of an IFD.
    #[inline]
    pub const fn count_size(self) -> usize {
        match self {
            Layout::Classic => 2,
            Layout::Big => 8,
        }
    }

    /// Size of the next IFD offset field at the end of an IFD.
    #[inline]
    pub const fn next_offset_size(self) -> usize {
        match self {
            Layout::Classic => 4,
            Layout::Big => 8,
        }
    }

    /// Size of the value/offset field in an IFD entry, which is also the
    /// largest value stored inline.
    #[inline]
    pub const fn inline_capacity(self) -> usize {
        match self {
            Layout::Classic => 4,
            Layout::Big => 8,
        }
    }

    /// Bytes taken by a directory with `entry_count` entries, or `None` if
    /// that does not fit in a u64.
    pub fn directory_span(self, entry_count: u64) -> Option<u64> {
        entry_count
            .checked_mul(self.entry_size() as u64)?
            .checked_add((self.count_size() + self.next_offset_size()) as u64)
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the file
    pub byte_order: ByteOrder,

    /// Version number from bytes 2-3
    pub version: u16,

    pub layout: Layout,

    /// Width of offsets in bytes (4 or 8)
    pub offset_size: u16,

    /// Offset to the first IFD in the file
    pub first_ifd_offset: u64,
}

impl TiffHeader {
    /// Read the header at the start of the source.
    ///
    /// On success the reader's byte order is set to the file's.
    pub fn read(reader: &mut ByteReader, versions: &VersionRegistry) -> Result<Self, TiffError> {
        reader.seek(0);
        let magic = reader.read_array::<2>()?;
        let byte_order = ByteOrder::from_magic(magic).ok_or(TiffError::InvalidByteOrder(magic))?;
        reader.set_byte_order(byte_order);

        let version = reader.read_u16()?;
        let dialect = versions
            .get(version)
            .ok_or(TiffError::UnsupportedVersion(version))?;
        let header = dialect.read_header(reader)?;

        debug!(
            source = reader.identifier(),
            byte_order = %byte_order,
            version,
            dialect = dialect.name(),
            first_ifd_offset = header.first_ifd_offset,
            "Parsed TIFF header"
        );
        Ok(header)
    }

    #[inline]
    pub fn is_bigtiff(&self) -> bool {
        self.layout == Layout::Big
    }
}

// =============================================================================
// Container
// =============================================================================

/// A parsed TIFF file: header, directory chain and the open source.
///
/// The reader stays open so that strips, sub-IFDs and Exif directories can be
/// read after the main chain has been walked.
#[derive(Debug)]
pub struct Container {
    header: TiffHeader,
    directories: Vec<Directory>,
    reader: ByteReader,
    registry: Registry,
    options: ParseOptions,
}

impl Container {
    /// Parse the header and walk the whole directory chain.
    pub fn parse(
        mut reader: ByteReader,
        registry: &Registry,
        options: &ParseOptions,
    ) -> Result<Self, TiffError> {
        let header = TiffHeader::read(&mut reader, registry.versions())?;

        let mut visited = HashSet::new();
        let mut directories: Vec<Directory> = Vec::new();
        let mut offset = header.first_ifd_offset;

        while offset != 0 {
            if !visited.insert(offset) {
                return Err(TiffError::CircularDirectoryChain {
                    offset,
                    index: directories.len().saturating_sub(1),
                });
            }
            if directories.len() >= options.max_directories {
                return Err(TiffError::TooManyDirectories {
                    limit: options.max_directories,
                });
            }

            let index = directories.len();
            let directory = Directory::parse(
                &mut reader,
                offset,
                header.layout,
                registry.tags(),
                registry.field_types(),
                options,
            )
            .map_err(|e| TiffError::Directory {
                index,
                offset,
                source: Box::new(e),
            })?;

            offset = directory.next_offset();
            directories.push(directory);
        }

        debug!(
            source = reader.identifier(),
            directories = directories.len(),
            "Walked directory chain"
        );

        Ok(Self {
            header,
            directories,
            reader,
            registry: registry.clone(),
            options: options.clone(),
        })
    }

    /// Parse in-memory bytes with the default registry and limits.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self, TiffError> {
        Self::parse(
            ByteReader::from_bytes(data),
            &Registry::default(),
            &ParseOptions::default(),
        )
    }

    /// Open and parse a file with the default registry and limits.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TiffError> {
        let reader = ByteReader::new(Arc::new(FileReader::open(path)?));
        Self::parse(reader, &Registry::default(), &ParseOptions::default())
    }

    pub fn header(&self) -> &TiffHeader {
        &self.header
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    /// Directories of the main chain, in chain order.
    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    pub fn directory(&self, index: usize) -> Option<&Directory> {
        self.directories.get(index)
    }

    /// The source the container was parsed from, for out-of-band reads.
    pub fn reader(&self) -> &ByteReader {
        &self.reader
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a directory outside the main chain, resolving tags against
    /// `tags`.
    ///
    /// Only the directory at `offset` is parsed; its next-IFD link is not
    /// followed.
    pub fn sub_directory(&self, offset: u64, tags: &TagSpace) -> Result<Directory, TiffError> {
        let mut reader = self.reader.clone();
        Directory::parse(
            &mut reader,
            offset,
            self.header.layout,
            tags,
            self.registry.field_types(),
            &self.options,
        )
    }

    /// Parse every directory that a pointer field of `directory` refers to.
    ///
    /// Works for SubIFDs (330) as well as the Exif, GPS and Interoperability
    /// pointers. A missing field yields no directories. Zero offsets are
    /// skipped.
    pub fn sub_directories(
        &self,
        directory: &Directory,
        tag_id: u16,
        tags: &TagSpace,
    ) -> Result<Vec<Directory>, TiffError> {
        let Some(offsets) = directory.get::<Vec<u64>>(tag_id)? else {
            return Ok(Vec::new());
        };

        let mut out = Vec::with_capacity(offsets.len());
        for offset in offsets {
            if offset == 0 {
                warn!(tag = tag_id, "Skipping null sub-IFD pointer");
                continue;
            }
            out.push(self.sub_directory(offset, tags)?);
        }
        Ok(out)
    }
}

// =============================================================================
// Tests
// =============================================================================
