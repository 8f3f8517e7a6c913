//! Format sniffing.
//!
//! Looks at the first four bytes only: the byte-order magic and the version
//! number. This is enough to tell whether a source is worth handing to
//! [`Container::parse`](super::tiff::Container::parse) without reading any
//! directories.

use super::tiff::{Layout, VersionRegistry, VERSION_BIGTIFF, VERSION_TIFF};
use crate::error::TiffError;
use crate::io::{ByteOrder, ByteReader};

/// Bytes needed to sniff a source.
const SNIFF_BYTES: usize = 4;

/// What the first bytes of a source say about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detected {
    pub byte_order: ByteOrder,
    pub version: u16,
    /// Name of the dialect registered for the version
    pub dialect: String,
    pub layout: Layout,
}

/// Identify the byte order and dialect of a source.
///
/// # Errors
/// - `TruncatedRead` if the source is shorter than four bytes
/// - `InvalidByteOrder` if the magic is neither "II" nor "MM"
/// - `UnsupportedVersion` if no dialect is registered for the version
pub fn detect(reader: &ByteReader, versions: &VersionRegistry) -> Result<Detected, TiffError> {
    let head = reader.read_at(0, SNIFF_BYTES)?;
    let magic = [head[0], head[1]];
    let byte_order = ByteOrder::from_magic(magic).ok_or(TiffError::InvalidByteOrder(magic))?;
    let version = byte_order.read_u16(&head[2..4]);
    let dialect = versions
        .get(version)
        .ok_or(TiffError::UnsupportedVersion(version))?;

    Ok(Detected {
        byte_order,
        version,
        dialect: dialect.name().to_string(),
        layout: dialect.layout(),
    })
}

/// Check if bytes start like a classic TIFF or BigTIFF file.
///
/// This is a quick check that can be used before attempting full parsing.
/// Registered variants such as TIFF85 are not recognized here; use
/// [`detect`] with the registry that knows them.
pub fn is_tiff_header(bytes: &[u8]) -> bool {
    if bytes.len() < SNIFF_BYTES {
        return false;
    }

    let Some(byte_order) = ByteOrder::from_magic([bytes[0], bytes[1]]) else {
        return false;
    };

    let version = byte_order.read_u16(&bytes[2..4]);
    version == VERSION_TIFF || version == VERSION_BIGTIFF
}

// =============================================================================
// Tests
// =============================================================================
