//! Exif, GPS and Interoperability directories.
//!
//! These directories hang off pointer tags instead of the main chain, and
//! their tags reuse ids with other meanings, so each is parsed with its own
//! tag space.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::exif::{
    EXIF_IFD_TAG, EXIF_SPACE, GPS_IFD_TAG, GPS_SPACE, INTEROP_IFD_TAG, INTEROP_SPACE,
};
use crate::error::TiffError;
use crate::format::tiff::{Container, Directory};
use crate::registry::TagSpace;

/// The Exif directory and the optional directories it leads to.
#[derive(Debug, Clone)]
pub struct ExifDirectories {
    pub exif: Directory,
    pub gps: Option<Directory>,
    pub interop: Option<Directory>,
}

/// Find and parse the Exif directory of a container.
///
/// The Exif pointer is taken from the first directory of the main chain that
/// has one. GPS and Interoperability pointers are looked up in the Exif
/// directory first, then in the directory holding the Exif pointer. A broken GPS or Interoperability pointer is
/// logged and skipped; a broken Exif pointer is an error.
pub fn parse_exif(container: &Container) -> Result<ExifDirectories, TiffError> {
    let owner = container
        .directories()
        .iter()
        .find(|d| d.has_field(EXIF_IFD_TAG))
        .ok_or(TiffError::MissingTag(EXIF_IFD_TAG))?;
    let offset: u64 = owner.require(EXIF_IFD_TAG)?;

    let exif = container.sub_directory(offset, &space(container, EXIF_SPACE))?;
    debug!(offset, fields = exif.fields().len(), "Parsed Exif IFD");

    let gps = linked_directory(container, &exif, owner, GPS_IFD_TAG, GPS_SPACE);
    let interop = linked_directory(container, &exif, owner, INTEROP_IFD_TAG, INTEROP_SPACE);

    Ok(ExifDirectories { exif, gps, interop })
}

fn space(container: &Container, name: &str) -> Arc<TagSpace> {
    let registry = container.registry();
    registry.tag_space(name).unwrap_or_else(|| {
        warn!(space = name, "Tag space not registered, using the default space");
        Arc::clone(registry.tags())
    })
}

fn linked_directory(
    container: &Container,
    exif: &Directory,
    owner: &Directory,
    tag: u16,
    space_name: &str,
) -> Option<Directory> {
    let holders = [exif, owner];
    let offset = holders
        .iter()
        .filter_map(|d| d.get::<u64>(tag).ok().flatten())
        .find(|&offset| offset != 0)?;

    match container.sub_directory(offset, &space(container, space_name)) {
        Ok(directory) => Some(directory),
        Err(e) => {
            warn!(tag, offset, error = %e, "Skipping unreadable {} IFD", space_name);
            None
        }
    }
}
