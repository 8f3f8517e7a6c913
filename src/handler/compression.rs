//! Compression schemes.
//!
//! Only uncompressed data is decoded. Every other scheme is recognized by id
//! so it can be reported, and fails with [`TiffError::UnsupportedCompression`].

use bytes::Bytes;

use crate::error::TiffError;

/// TIFF compression scheme identifiers (tag 259).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Compression {
    /// No compression
    None = 1,

    /// CCITT Group 3 1-D modified Huffman run length encoding
    CcittRle = 2,

    Lzw = 5,

    /// "Old-style" JPEG, rarely used
    OldJpeg = 6,

    Jpeg = 7,

    /// Deflate/zlib compression
    Deflate = 8,

    PackBits = 32773,

    AdobeDeflate = 32946,
}

impl Compression {
    /// Create a Compression from its numeric value.
    ///
    /// Returns `None` for unrecognized compression values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Compression::None),
            2 => Some(Compression::CcittRle),
            5 => Some(Compression::Lzw),
            6 => Some(Compression::OldJpeg),
            7 => Some(Compression::Jpeg),
            8 => Some(Compression::Deflate),
            32773 => Some(Compression::PackBits),
            32946 => Some(Compression::AdobeDeflate),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Check if this compression scheme can be decoded.
    #[inline]
    pub const fn is_supported(self) -> bool {
        matches!(self, Compression::None)
    }

    /// Get a human-readable name for the compression scheme.
    pub const fn name(self) -> &'static str {
        match self {
            Compression::None => "None",
            Compression::CcittRle => "CCITT RLE",
            Compression::Lzw => "LZW",
            Compression::OldJpeg => "Old JPEG",
            Compression::Jpeg => "JPEG",
            Compression::Deflate => "Deflate",
            Compression::PackBits => "PackBits",
            Compression::AdobeDeflate => "Adobe Deflate",
        }
    }

    /// Decode one strip.
    pub fn decompress(self, data: Bytes) -> Result<Bytes, TiffError> {
        match self {
            Compression::None => Ok(data),
            other => Err(TiffError::UnsupportedCompression(other.as_u16())),
        }
    }
}

/// Decode one strip compressed with the scheme `id`.
pub fn decompress(id: u16, data: Bytes) -> Result<Bytes, TiffError> {
    Compression::from_u16(id)
        .ok_or(TiffError::UnsupportedCompression(id))?
        .decompress(data)
}

// =============================================================================
// Tests
// =============================================================================
