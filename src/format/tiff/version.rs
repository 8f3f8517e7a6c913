//! Version dispatch.
//!
//! The two bytes after the byte-order magic select a dialect. A dialect reads
//! the rest of the header and decides the [`Layout`] of every directory in
//! the file. Classic TIFF (42) and BigTIFF (43) are registered by default;
//! variants such as TIFF85 can be added at runtime.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::parser::{Layout, TiffHeader};
use crate::error::TiffError;
use crate::io::ByteReader;

/// Version number for classic TIFF
pub const VERSION_TIFF: u16 = 42;

/// Version number for BigTIFF
pub const VERSION_BIGTIFF: u16 = 43;

/// Version number of the TIFF85 variant
pub const VERSION_TIFF85: u16 = 0x55;

/// Reads the header tail of one TIFF version.
pub trait Dialect: Send + Sync {
    /// Version number this dialect handles.
    fn version(&self) -> u16;

    fn name(&self) -> &str;

    /// Directory layout used by files of this version.
    fn layout(&self) -> Layout;

    /// Parse the header after the magic and version.
    ///
    /// The reader has its byte order set and is positioned at offset 4.
    fn read_header(&self, reader: &mut ByteReader) -> Result<TiffHeader, TiffError>;
}

// =============================================================================
// Classic
// =============================================================================

/// 32-bit offsets, 12-byte entries.
#[derive(Debug, Clone)]
pub struct ClassicDialect {
    version: u16,
    name: &'static str,
}

impl ClassicDialect {
    pub const fn tiff() -> Self {
        Self {
            version: VERSION_TIFF,
            name: "TIFF",
        }
    }

    /// The TIFF85 variant. It shares the classic layout.
    pub const fn tiff85() -> Self {
        Self {
            version: VERSION_TIFF85,
            name: "TIFF85",
        }
    }
}

impl Dialect for ClassicDialect {
    fn version(&self) -> u16 {
        self.version
    }

    fn name(&self) -> &str {
        self.name
    }

    fn layout(&self) -> Layout {
        Layout::Classic
    }

    fn read_header(&self, reader: &mut ByteReader) -> Result<TiffHeader, TiffError> {
        let first_ifd_offset = reader.read_u32()? as u64;
        if first_ifd_offset < Layout::Classic.header_size() as u64 {
            return Err(TiffError::MalformedHeader {
                reason: format!("first IFD offset {first_ifd_offset} lies inside the header"),
            });
        }

        Ok(TiffHeader {
            byte_order: reader.byte_order(),
            version: self.version,
            layout: Layout::Classic,
            offset_size: 4,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// BigTIFF
// =============================================================================

/// 64-bit offsets, 20-byte entries.
#[derive(Debug, Clone, Default)]
pub struct BigDialect;

impl Dialect for BigDialect {
    fn version(&self) -> u16 {
        VERSION_BIGTIFF
    }

    fn name(&self) -> &str {
        "BigTIFF"
    }

    fn layout(&self) -> Layout {
        Layout::Big
    }

    fn read_header(&self, reader: &mut ByteReader) -> Result<TiffHeader, TiffError> {
        let offset_size = reader.read_u16()?;
        if offset_size != 8 {
            return Err(TiffError::MalformedHeader {
                reason: format!("BigTIFF offset size is {offset_size}, expected 8"),
            });
        }

        let reserved = reader.read_u16()?;
        if reserved != 0 {
            warn!(
                source = reader.identifier(),
                reserved, "Non-zero reserved field in BigTIFF header"
            );
        }

        let first_ifd_offset = reader.read_u64()?;
        if first_ifd_offset < Layout::Big.header_size() as u64 {
            return Err(TiffError::MalformedHeader {
                reason: format!("first IFD offset {first_ifd_offset} lies inside the header"),
            });
        }

        Ok(TiffHeader {
            byte_order: reader.byte_order(),
            version: VERSION_BIGTIFF,
            layout: Layout::Big,
            offset_size,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// VersionRegistry
// =============================================================================

/// Maps version numbers to dialects.
pub struct VersionRegistry {
    dialects: RwLock<HashMap<u16, Arc<dyn Dialect>>>,
}

impl VersionRegistry {
    /// An empty registry. Every version is unsupported until registered.
    pub fn new() -> Self {
        Self {
            dialects: RwLock::new(HashMap::new()),
        }
    }

    /// Register a dialect, replacing any previous one for the same version.
    pub fn register(&self, dialect: Arc<dyn Dialect>) {
        let version = dialect.version();
        debug!(version, name = dialect.name(), "Registering TIFF dialect");
        self.dialects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(version, dialect);
    }

    pub fn get(&self, version: u16) -> Option<Arc<dyn Dialect>> {
        self.dialects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&version)
            .cloned()
    }

    pub fn contains(&self, version: u16) -> bool {
        self.get(version).is_some()
    }

    /// Registered version numbers in ascending order.
    pub fn versions(&self) -> Vec<u16> {
        let dialects = self.dialects.read().unwrap_or_else(PoisonError::into_inner);
        let mut versions: Vec<u16> = dialects.keys().copied().collect();
        versions.sort_unstable();
        versions
    }
}

impl Default for VersionRegistry {
    fn default() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(ClassicDialect::tiff()));
        registry.register(Arc::new(BigDialect));
        registry
    }
}

impl fmt::Debug for VersionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionRegistry")
            .field("versions", &self.versions())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
