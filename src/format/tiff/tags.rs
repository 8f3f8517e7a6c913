//! Well-known tag ids the library itself looks at.
//!
//! Names for display come from the registry catalogs; this enum only covers
//! the tags the baseline handler and handler dispatch read. The Exif pointer
//! ids live with their tag sets in `catalog::exif`.

/// Tag ids with a fixed meaning to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TiffTag {
    // -------------------------------------------------------------------------
    // Image Structure
    // -------------------------------------------------------------------------
    /// Image width in pixels
    ImageWidth = 256,

    /// Image height (length) in pixels
    ImageLength = 257,

    BitsPerSample = 258,

    Compression = 259,

    PhotometricInterpretation = 262,

    /// Scanner or camera manufacturer, used to pick a handler
    Make = 271,

    SamplesPerPixel = 277,

    // -------------------------------------------------------------------------
    // Strip Organization
    // -------------------------------------------------------------------------
    StripOffsets = 273,

    StripByteCounts = 279,

    // -------------------------------------------------------------------------
    // Directory Pointers
    // -------------------------------------------------------------------------
    /// Offsets of child IFDs
    SubIfds = 330,
}

impl TiffTag {
    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl From<TiffTag> for u16 {
    fn from(tag: TiffTag) -> u16 {
        tag.as_u16()
    }
}

// =============================================================================
// Tests
// =============================================================================
