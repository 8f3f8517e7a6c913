use thiserror::Error;

/// I/O errors that can occur when reading from a byte source
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// The underlying reader failed
    #[error("Read failed at offset {offset}: {message}")]
    Source { offset: u64, message: String },
}

/// Errors raised when registering tags or field types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The set has been locked and accepts no further registrations
    #[error("Set {set:?} is locked")]
    Locked { set: String },

    /// The tag id falls outside the bounds of the set
    #[error("Tag {id} is outside the range {lower}..={upper} of set {set:?}")]
    OutOfRange {
        set: String,
        id: u16,
        lower: u16,
        upper: u16,
    },

    /// A tag id is already registered under another name
    #[error("Tag {id} in set {set:?} is already registered as {existing:?}, refusing {name:?}")]
    TagConflict {
        set: String,
        id: u16,
        existing: String,
        name: String,
    },

    /// A field type id is already registered with another name or size
    #[error(
        "Field type {id} in set {set:?} is already registered as {existing:?} ({existing_size} bytes), \
         refusing {name:?} ({size} bytes)"
    )]
    FieldTypeConflict {
        set: String,
        id: u16,
        existing: String,
        existing_size: u64,
        name: String,
        size: u64,
    },
}

/// Errors that can occur when parsing TIFF files
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Registry error while building tag or field type spaces
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Invalid byte order marker (not II or MM)
    #[error("Invalid byte order: expected \"II\" or \"MM\", got {0:02X?}")]
    InvalidByteOrder([u8; 2]),

    /// No dialect is registered for the version number
    #[error("Unsupported TIFF version: {0} (0x{0:04X})")]
    UnsupportedVersion(u16),

    /// Header tail is inconsistent (offset size, first IFD offset)
    #[error("Malformed header: {reason}")]
    MalformedHeader { reason: String },

    /// The source ended before a fixed-size value could be read
    #[error("Truncated read: needed {needed} bytes at offset {offset}")]
    TruncatedRead { offset: u64, needed: u64 },

    /// Section reads need a non-negative offset and a positive length
    #[error("Invalid section bounds: offset {offset}, length {len}")]
    InvalidSectionBounds { offset: i64, len: i64 },

    /// The next-IFD chain points back to a directory already visited
    #[error("Circular directory chain: IFD {index} points back to offset {offset}")]
    CircularDirectoryChain { offset: u64, index: usize },

    /// The directory chain is longer than the configured limit
    #[error("Too many directories: limit is {limit}")]
    TooManyDirectories { limit: usize },

    /// Entry count of a directory exceeds sane bounds
    #[error("Directory at offset {offset} declares {entry_count} entries")]
    DirectoryTooLarge { offset: u64, entry_count: u64 },

    /// Field value would exceed the configured size limit
    #[error("Value of tag {tag} is too large: {count} x {type_size} bytes")]
    ValueTooLarge { tag: u16, count: u64, type_size: u64 },

    /// Reading the out-of-line value of a field failed
    #[error("Failed to read value of tag {tag} at offset {offset}: {source}")]
    ValueRead {
        tag: u16,
        offset: u64,
        #[source]
        source: Box<TiffError>,
    },

    /// Parsing one directory of the chain failed
    #[error("Failed to parse IFD {index} at offset {offset}: {source}")]
    Directory {
        index: usize,
        offset: u64,
        #[source]
        source: Box<TiffError>,
    },

    /// Field value cannot be converted into the requested type
    #[error("Cannot convert tag {tag} ({found}) into {expected}")]
    UnresolvedConversion {
        tag: u16,
        expected: &'static str,
        found: String,
    },

    /// Required tag is missing from IFD
    #[error("Missing required tag: {0}")]
    MissingTag(u16),

    /// Unsupported compression scheme
    #[error("Unsupported compression: {0}")]
    UnsupportedCompression(u16),
}
