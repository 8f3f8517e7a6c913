//! TIFF-family container formats.
//!
//! [`tiff`] walks directory chains and resolves field values; [`detect`]
//! sniffs a source before parsing it.

pub mod detect;
pub mod tiff;

pub use detect::{detect, is_tiff_header, Detected};
