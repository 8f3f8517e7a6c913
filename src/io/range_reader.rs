use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use bytes::Bytes;

use crate::error::IoError;

/// Trait for reading byte ranges from a random-access resource.
///
/// This abstraction allows the directory walker to work the same way on
/// in-memory buffers, files on disk and piped streams. Implementations must be
/// thread-safe so that a parsed container can be shared after parsing.
pub trait RangeReader: Send + Sync {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns an error if the range is out of bounds or if the read fails.
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the resource in bytes, if it is known.
    ///
    /// Streamed sources do not know their size until they are drained.
    fn size(&self) -> Option<u64>;

    /// Get a unique identifier for this resource (for logging).
    fn identifier(&self) -> &str;
}

// =============================================================================
// MemoryReader
// =============================================================================

/// A reader over bytes that are already in memory.
pub struct MemoryReader {
    data: Bytes,
    identifier: String,
}

impl MemoryReader {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            identifier: "memory".to_string(),
        }
    }

    /// Set the identifier used in log messages.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }
}

impl RangeReader for MemoryReader {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let size = self.data.len() as u64;
        let end = offset.checked_add(len as u64);
        match end {
            Some(end) if end <= size => Ok(self.data.slice(offset as usize..end as usize)),
            _ => Err(IoError::RangeOutOfBounds {
                offset,
                requested: len as u64,
                size,
            }),
        }
    }

    fn size(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// FileReader
// =============================================================================

/// A reader over any seekable source, such as a file on disk.
///
/// Reads seek the inner source directly, so no bytes are buffered beyond the
/// ranges that are requested.
pub struct FileReader<R> {
    inner: Mutex<R>,
    size: u64,
    identifier: String,
}

impl FileReader<File> {
    /// Open a file on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IoError::Source {
            offset: 0,
            message: format!("{}: {}", path.display(), e),
        })?;
        Ok(Self::new(file)?.with_identifier(path.display().to_string()))
    }
}

impl<R: Read + Seek> FileReader<R> {
    /// Wrap a seekable source. The size is determined by seeking to the end.
    pub fn new(mut inner: R) -> Result<Self, IoError> {
        let size = inner.seek(SeekFrom::End(0)).map_err(|e| IoError::Source {
            offset: 0,
            message: e.to_string(),
        })?;
        Ok(Self {
            inner: Mutex::new(inner),
            size,
            identifier: "seekable".to_string(),
        })
    }

    /// Set the identifier used in log messages.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }
}

impl<R: Read + Seek + Send> RangeReader for FileReader<R> {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let out_of_bounds = || IoError::RangeOutOfBounds {
            offset,
            requested: len as u64,
            size: self.size,
        };
        match offset.checked_add(len as u64) {
            Some(end) if end <= self.size => {}
            _ => return Err(out_of_bounds()),
        }

        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let source_error = |e: std::io::Error| IoError::Source {
            offset,
            message: e.to_string(),
        };
        inner.seek(SeekFrom::Start(offset)).map_err(source_error)?;

        let mut buf = vec![0u8; len];
        match inner.read_exact(&mut buf) {
            Ok(()) => Ok(Bytes::from(buf)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(out_of_bounds()),
            Err(e) => Err(source_error(e)),
        }
    }

    fn size(&self) -> Option<u64> {
        Some(self.size)
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// Tests
// =============================================================================
