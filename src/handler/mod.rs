//! Hooks for the image layer.
//!
//! The walker does not decode pixels. Instead, a [`Handler`] that knows a
//! family of files hands out a [`Decoder`] for a parsed [`Container`].
//! Handlers are found through a [`HandlerRegistry`]:
//!
//! 1. Handlers keyed by a distinguishing tag are tried first, in ascending
//!    tag order, when IFD0 carries that tag (TIFF/EP's 37398, DNG's 50706).
//! 2. Then the handler registered for IFD0's Make string, if any.
//! 3. Otherwise the [`BaselineHandler`] reads uncompressed strips.

mod baseline;
mod compression;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;
use tracing::debug;

pub use baseline::{BaselineDecoder, BaselineHandler};
pub use compression::{decompress, Compression};

use crate::error::TiffError;
use crate::format::tiff::{Container, TiffTag};

// =============================================================================
// Decoder / Handler
// =============================================================================

/// How samples map to colors, as far as the header tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    Gray,
    Gray16,
    Rgba,
    Rgba64,
    /// A ColorMap is present
    Palette,
    Unknown,
}

/// Image dimensions and sample layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u16,
    pub bits_per_sample: Vec<u16>,
    /// Compression id from tag 259
    pub compression: u16,
    pub photometric: Option<u16>,
    pub color_model: ColorModel,
}

/// Decompressed sample bytes, strips concatenated in order.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub config: ImageConfig,
    pub data: Bytes,
}

/// Produces image data from a parsed container.
pub trait Decoder {
    fn config(&self) -> Result<ImageConfig, TiffError>;

    fn image(&self) -> Result<RawImage, TiffError>;
}

/// Knows how to decode some family of files.
pub trait Handler: Send + Sync {
    fn can_handle(&self, container: &Container) -> bool;

    fn decoder<'a>(&self, container: &'a Container) -> Result<Box<dyn Decoder + 'a>, TiffError>;
}

// =============================================================================
// HandlerRegistry
// =============================================================================

/// Handlers keyed by Make string or by a distinguishing tag in IFD0.
#[derive(Default)]
pub struct HandlerRegistry {
    by_make: RwLock<HashMap<String, Arc<dyn Handler>>>,
    by_tag: RwLock<BTreeMap<u16, Arc<dyn Handler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for files whose Make tag equals `make`.
    pub fn register_by_make(&self, make: impl Into<String>, handler: Arc<dyn Handler>) {
        self.by_make
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(make.into(), handler);
    }

    /// Register a handler for files whose IFD0 carries `tag`.
    pub fn register_by_tag(&self, tag: u16, handler: Arc<dyn Handler>) {
        self.by_tag
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tag, handler);
    }

    pub fn handler_by_make(&self, make: &str) -> Option<Arc<dyn Handler>> {
        self.by_make
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(make)
            .cloned()
    }

    pub fn handler_by_tag(&self, tag: u16) -> Option<Arc<dyn Handler>> {
        self.by_tag
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&tag)
            .cloned()
    }

    /// Tags with a registered handler, ascending.
    pub fn tag_ids(&self) -> Vec<u16> {
        self.by_tag
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    /// Find a registered handler willing to take the container.
    pub fn find(&self, container: &Container) -> Option<Arc<dyn Handler>> {
        let ifd0 = container.directory(0)?;

        for tag in self.tag_ids() {
            if !ifd0.has_field(tag) {
                continue;
            }
            if let Some(handler) = self.handler_by_tag(tag) {
                if handler.can_handle(container) {
                    debug!(tag, "Selected handler by tag presence");
                    return Some(handler);
                }
            }
        }

        let make = ifd0.get_field(TiffTag::Make.as_u16())?;
        let make = trim_make(make.bytes());
        let handler = self.handler_by_make(&make)?;
        if handler.can_handle(container) {
            debug!(make = %make, "Selected handler by Make");
            return Some(handler);
        }
        None
    }

    /// A decoder from the first matching handler, falling back to
    /// [`BaselineHandler`].
    pub fn decoder<'a>(&self, container: &'a Container) -> Result<Box<dyn Decoder + 'a>, TiffError> {
        match self.find(container) {
            Some(handler) => handler.decoder(container),
            None => BaselineHandler.decoder(container),
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let makes: Vec<String> = self
            .by_make
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        f.debug_struct("HandlerRegistry")
            .field("makes", &makes)
            .field("tags", &self.tag_ids())
            .finish()
    }
}

/// Make values are often padded with spaces and NULs.
fn trim_make(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

// =============================================================================
// Tests
// =============================================================================
