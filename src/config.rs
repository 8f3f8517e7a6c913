//! Configuration for parsing and for the `tiffwalk` binary.
//!
//! [`ParseOptions`] and [`RegistryOptions`] are plain structs used by the
//! library. [`Config`] is the command-line parser; every option can also be
//! set through an environment variable with the `TIFFWALK_` prefix:
//!
//! - `TIFFWALK_MAX_DIRECTORIES` - Directories walked before giving up (default: 4096)
//! - `TIFFWALK_MAX_ENTRIES` - Entries allowed in one directory (default: 1000000)
//! - `TIFFWALK_MAX_VALUE_SIZE` - Bytes allowed for one field value (default: 256 MiB)
//! - `TIFFWALK_UNICODE_SIZE` - Byte size of the UNICODE field type (default: 2)
//! - `TIFFWALK_COMPLEX_SIZE` - Byte size of the COMPLEX field type (default: 8)
//! - `TIFFWALK_TIFF85` - Accept version 0x55 files (default: false)

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default limit on the number of directories in a chain.
pub const DEFAULT_MAX_DIRECTORIES: usize = 4096;

/// Default limit on the entry count of one directory.
pub const DEFAULT_MAX_ENTRY_COUNT: u64 = 1_000_000;

/// Default limit on the resolved size of one field value (256 MiB).
pub const DEFAULT_MAX_VALUE_SIZE: u64 = 256 * 1024 * 1024;

/// Default UNICODE element size.
pub const DEFAULT_UNICODE_SIZE: u64 = 2;

/// Default COMPLEX element size.
pub const DEFAULT_COMPLEX_SIZE: u64 = 8;

// =============================================================================
// Library Options
// =============================================================================

/// Limits applied while walking a container.
///
/// Every count and offset in a file is untrusted; these bound the work and
/// memory a single parse may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_directories: usize,
    pub max_entry_count: u64,
    pub max_value_size: u64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_directories: DEFAULT_MAX_DIRECTORIES,
            max_entry_count: DEFAULT_MAX_ENTRY_COUNT,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
        }
    }
}

/// Sizes for field types whose width the format leaves open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    pub unicode_size: u64,
    pub complex_size: u64,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            unicode_size: DEFAULT_UNICODE_SIZE,
            complex_size: DEFAULT_COMPLEX_SIZE,
        }
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// tiffwalk - Walk the directories of a TIFF or BigTIFF file.
///
/// Prints the header and every field of every directory in the main chain.
#[derive(Parser, Debug, Clone)]
#[command(name = "tiffwalk")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// File to read, or "-" for standard input.
    #[arg(default_value = "-")]
    pub path: String,

    // =========================================================================
    // Output
    // =========================================================================
    /// Print every value instead of a shortened preview.
    #[arg(short, long, default_value_t = false)]
    pub full: bool,

    /// Also print the Exif, GPS and Interoperability directories.
    #[arg(long, default_value_t = false)]
    pub exif: bool,

    /// Also print the image configuration reported by the matching handler.
    #[arg(long, default_value_t = false)]
    pub image: bool,

    // =========================================================================
    // Limits
    // =========================================================================
    /// Maximum number of directories to walk.
    #[arg(long, default_value_t = DEFAULT_MAX_DIRECTORIES, env = "TIFFWALK_MAX_DIRECTORIES")]
    pub max_directories: usize,

    /// Maximum number of entries in one directory.
    #[arg(long = "max-entries", default_value_t = DEFAULT_MAX_ENTRY_COUNT, env = "TIFFWALK_MAX_ENTRIES")]
    pub max_entry_count: u64,

    /// Maximum size in bytes of one field value.
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE_SIZE, env = "TIFFWALK_MAX_VALUE_SIZE")]
    pub max_value_size: u64,

    // =========================================================================
    // Registry
    // =========================================================================
    /// Byte size of the UNICODE field type (14).
    #[arg(long, default_value_t = DEFAULT_UNICODE_SIZE, env = "TIFFWALK_UNICODE_SIZE")]
    pub unicode_size: u64,

    /// Byte size of the COMPLEX field type (15).
    #[arg(long, default_value_t = DEFAULT_COMPLEX_SIZE, env = "TIFFWALK_COMPLEX_SIZE")]
    pub complex_size: u64,

    /// Accept the TIFF85 version code (0x55) with the classic layout.
    #[arg(long, default_value_t = false, env = "TIFFWALK_TIFF85")]
    pub tiff85: bool,

    // =========================================================================
    // Logging
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.path.is_empty() {
            return Err("A file path is required, or \"-\" for standard input".to_string());
        }

        if self.max_directories == 0 {
            return Err("max_directories must be greater than 0".to_string());
        }
        if self.max_entry_count == 0 {
            return Err("max_entries must be greater than 0".to_string());
        }
        if self.max_value_size == 0 {
            return Err("max_value_size must be greater than 0".to_string());
        }

        if self.unicode_size == 0 || self.complex_size == 0 {
            return Err("Field type sizes must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Whether the input is standard input.
    pub fn reads_stdin(&self) -> bool {
        self.path == "-"
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_directories: self.max_directories,
            max_entry_count: self.max_entry_count,
            max_value_size: self.max_value_size,
        }
    }

    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            unicode_size: self.unicode_size,
            complex_size: self.complex_size,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
