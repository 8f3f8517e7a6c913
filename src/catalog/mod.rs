//! Built-in tag and field type catalogs.
//!
//! Each module contributes one or more sets. [`Registry::default`] wires them
//! into the default spaces; callers assembling their own registry can pick
//! the sets they need.
//!
//! [`Registry::default`]: crate::Registry

pub mod baseline;
pub mod exif;
pub mod extended;
pub mod field_types;
pub mod geotiff;
pub mod modi;
pub mod private;
pub mod tiffep;

use crate::registry::{Tag, TagSet};

/// Build a tag set from a static `(id, name)` table.
fn tag_set(name: &str, lower: u16, upper: u16, table: &[(u16, &str)], locked: bool) -> TagSet {
    let tags = table.iter().map(|&(id, n)| Tag::new(id, n, None));
    TagSet::preloaded(name, lower..=upper, tags, locked)
}
