//! TIFF and BigTIFF container parsing.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF files declare their endianness (II = little-endian, MM = big-endian)
//!   in the header. All multi-byte values must be read respecting this order.
//!
//! - **Dialects**: the version number after the byte order selects how the rest
//!   of the header is read and whether offsets are 32 or 64 bits wide.
//!
//! - **IFD (Image File Directory)**: a list of tagged entries plus a link to the
//!   next directory. A file is a chain of them.
//!
//! - **Inline vs offset values**: Small values are stored inline in the IFD entry,
//!   larger values are stored at an offset pointed to by the entry.

mod convert;
mod entry;
mod field;
mod ifd;
mod parser;
mod tags;
mod values;
mod version;

pub use convert::FromField;
pub use entry::Entry;
pub use field::Field;
pub use ifd::Directory;
pub use parser::{Container, Layout, TiffHeader};
pub use tags::TiffTag;
pub use values::{Rational, SRational, Value};
pub use version::{
    BigDialect, ClassicDialect, Dialect, VersionRegistry, VERSION_BIGTIFF, VERSION_TIFF,
    VERSION_TIFF85,
};
