//! # tiffwalk
//!
//! A reader for TIFF-family containers: classic TIFF, BigTIFF and registered
//! version variants.
//!
//! The library walks the chain of Image File Directories (IFDs) in a file,
//! resolves each field's value (inline in the entry or stored at an offset)
//! and names fields and types through pluggable registries, so vendor and
//! extension tags can be added without touching the parser.
//!
//! ## Features
//!
//! - **Two layouts, one model**: 32-bit classic and 64-bit BigTIFF share the same
//!   [`Directory`] and [`Field`] types
//! - **Pluggable dialects**: version codes map to header parsers in a [`VersionRegistry`]
//! - **Registries**: tag and field type sets merged into conflict-aware spaces
//! - **Streams**: piped input is buffered on demand, seekable input is read in place
//! - **Safe on bad input**: cycles, oversized directories and values are errors, not hangs
//!
//! ## Architecture
//!
//! - [`io`] - Byte sources and the byte-order aware [`ByteReader`]
//! - [`registry`] - Tags, field types, their sets and spaces
//! - [`catalog`] - The standard tag and field type catalogs
//! - [`mod@format`] - Header dialects, entries, fields, directories and the container
//! - [`exif`] - Exif, GPS and Interoperability sub-directories
//! - [`handler`] - Hooks for image decoders
//! - [`config`] - Parse limits and CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiffwalk::{Container, TiffTag};
//!
//! let container = Container::open("image.tif")?;
//! for (index, directory) in container.directories().iter().enumerate() {
//!     println!("IFD {} at {}", index, directory.offset());
//!     for field in directory.fields() {
//!         println!("  {}", field);
//!     }
//! }
//!
//! let ifd0 = &container.directories()[0];
//! let width: Option<u32> = ifd0.get(TiffTag::ImageWidth.as_u16())?;
//! # Ok::<(), tiffwalk::TiffError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod handler;
pub mod io;
pub mod registry;

// Re-export commonly used types
pub use config::{Config, ParseOptions, RegistryOptions};
pub use error::{IoError, RegistryError, TiffError};
pub use exif::{parse_exif, ExifDirectories};
pub use format::tiff::{
    BigDialect, ClassicDialect, Container, Dialect, Directory, Entry, Field, FromField, Layout,
    Rational, SRational, TiffHeader, TiffTag, Value, VersionRegistry, VERSION_BIGTIFF,
    VERSION_TIFF, VERSION_TIFF85,
};
pub use format::{detect, is_tiff_header, Detected};
pub use handler::{
    BaselineHandler, ColorModel, Compression, Decoder, Handler, HandlerRegistry, ImageConfig,
    RawImage,
};
pub use io::{ByteOrder, ByteReader, FileReader, MemoryReader, RangeReader, StreamBuffer};
pub use registry::{
    FieldType, FieldTypeSet, FieldTypeSpace, Registry, Tag, TagSet, TagSpace, DEFAULT_SPACE,
};
