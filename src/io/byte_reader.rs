//! Byte-order aware cursor over a [`RangeReader`].
//!
//! The TIFF header declares the byte order of everything that follows it, so
//! the reader starts out little-endian and is switched once the magic bytes
//! have been read.

use std::io::{Read, Seek};
use std::sync::Arc;

use bytes::Bytes;

use super::{FileReader, MemoryReader, RangeReader, StreamBuffer};
use crate::error::{IoError, TiffError};

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Map the two magic bytes at the start of a file to a byte order.
    pub fn from_magic(magic: [u8; 2]) -> Option<Self> {
        match &magic {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// The magic bytes that announce this byte order.
    pub const fn magic(self) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => *b"II",
            ByteOrder::BigEndian => *b"MM",
        }
    }

    /// Read a u16 from the start of a byte slice using this byte order.
    ///
    /// Short slices are zero-padded on the right.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        let raw = take::<2>(bytes);
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
        }
    }

    /// Read a u32 from the start of a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        let raw = take::<4>(bytes);
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(raw),
            ByteOrder::BigEndian => u32::from_be_bytes(raw),
        }
    }

    /// Read a u64 from the start of a byte slice using this byte order.
    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        let raw = take::<8>(bytes);
        match self {
            ByteOrder::LittleEndian => u64::from_le_bytes(raw),
            ByteOrder::BigEndian => u64::from_be_bytes(raw),
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteOrder::LittleEndian => write!(f, "little-endian (II)"),
            ByteOrder::BigEndian => write!(f, "big-endian (MM)"),
        }
    }
}

/// Copy the first `N` bytes of a slice into an array, zero-padding if short.
#[inline]
fn take<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let n = bytes.len().min(N);
    out[..n].copy_from_slice(&bytes[..n]);
    out
}

// =============================================================================
// ByteReader
// =============================================================================

/// A cursor with a fixed byte order over a shared byte source.
///
/// Sequential reads advance the cursor; section reads address the source
/// absolutely and leave the cursor alone. Cloning shares the source but gives
/// the clone its own cursor.
#[derive(Clone)]
pub struct ByteReader {
    source: Arc<dyn RangeReader>,
    order: ByteOrder,
    position: u64,
}

impl std::fmt::Debug for ByteReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteReader")
            .field("source", &self.source.identifier())
            .field("order", &self.order)
            .field("position", &self.position)
            .finish()
    }
}

impl ByteReader {
    /// Wrap a shared byte source. The byte order starts as little-endian.
    pub fn new(source: Arc<dyn RangeReader>) -> Self {
        Self {
            source,
            order: ByteOrder::LittleEndian,
            position: 0,
        }
    }

    /// Read from bytes that are already in memory.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::new(Arc::new(MemoryReader::new(data)))
    }

    /// Read from a seekable source without extra buffering.
    pub fn from_seekable<R>(inner: R) -> Result<Self, IoError>
    where
        R: Read + Seek + Send + 'static,
    {
        Ok(Self::new(Arc::new(FileReader::new(inner)?)))
    }

    /// Read from a forward-only stream, buffering on demand.
    pub fn from_stream<R>(inner: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::new(Arc::new(StreamBuffer::new(inner)))
    }

    /// Set the byte order used for all subsequent scalar reads.
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Move the cursor to an absolute offset.
    #[inline]
    pub fn seek(&mut self, offset: u64) {
        self.position = offset;
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total size of the source, if known.
    pub fn size(&self) -> Option<u64> {
        self.source.size()
    }

    pub fn identifier(&self) -> &str {
        self.source.identifier()
    }

    /// The shared byte source.
    pub fn source(&self) -> &Arc<dyn RangeReader> {
        &self.source
    }

    /// Read `len` bytes at the cursor and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, TiffError> {
        let bytes = self.read_at(self.position, len)?;
        self.position = self.position.saturating_add(len as u64);
        Ok(bytes)
    }

    /// Read exactly `N` bytes at the cursor into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], TiffError> {
        let bytes = self.read_bytes(N)?;
        Ok(take::<N>(&bytes))
    }

    pub fn read_u16(&mut self) -> Result<u16, TiffError> {
        let raw = self.read_array::<2>()?;
        Ok(self.order.read_u16(&raw))
    }

    pub fn read_u32(&mut self) -> Result<u32, TiffError> {
        let raw = self.read_array::<4>()?;
        Ok(self.order.read_u32(&raw))
    }

    pub fn read_u64(&mut self) -> Result<u64, TiffError> {
        let raw = self.read_array::<8>()?;
        Ok(self.order.read_u64(&raw))
    }

    /// Read `len` bytes at an absolute offset without moving the cursor.
    ///
    /// The offset must be non-negative and the length at least one byte.
    pub fn read_section(&self, offset: i64, len: i64) -> Result<Bytes, TiffError> {
        if offset < 0 || len < 1 {
            return Err(TiffError::InvalidSectionBounds { offset, len });
        }
        let len = usize::try_from(len).map_err(|_| TiffError::InvalidSectionBounds {
            offset,
            len,
        })?;
        self.read_at(offset as u64, len)
    }

    /// Read `len` bytes at an absolute offset without moving the cursor.
    pub fn read_at(&self, offset: u64, len: usize) -> Result<Bytes, TiffError> {
        if len == 0 {
            return Ok(Bytes::new());
        }
        self.source
            .read_exact_at(offset, len)
            .map_err(|e| match e {
                IoError::RangeOutOfBounds { .. } => TiffError::TruncatedRead {
                    offset,
                    needed: len as u64,
                },
                other => TiffError::Io(other),
            })
    }
}

// =============================================================================
// Tests
// =============================================================================
