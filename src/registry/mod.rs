//! Pluggable tag and field type registries.
//!
//! Tags and field types are grouped into named [sets](RegistrySet) that are
//! curated separately and then locked. Sets are merged into
//! [spaces](RegistrySpace), which resolve an id against all of their members.
//! A [`Registry`] bundles the spaces a parse needs, together with the
//! version dispatch table.

mod field_type;
mod set;
mod space;
mod tag;

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

pub use field_type::{DecodeFn, FieldType, ReprFn};
pub use set::{FieldTypeSet, Registrable, RegistrySet, TagSet};
pub use space::{FieldTypeSpace, RegistrySpace, TagSpace};
pub use tag::{FieldInterpreter, Tag};

use crate::catalog;
use crate::config::RegistryOptions;
use crate::format::tiff::VersionRegistry;

/// Name of the default tag space.
pub const DEFAULT_SPACE: &str = "Default";

/// Shared handle to everything a parse resolves against.
///
/// Cloning is cheap; clones share the same spaces.
#[derive(Clone)]
pub struct Registry {
    tags: Arc<TagSpace>,
    field_types: Arc<FieldTypeSpace>,
    versions: Arc<VersionRegistry>,
    private_tags: Arc<TagSet>,
    tag_spaces: Arc<RwLock<BTreeMap<String, Arc<TagSpace>>>>,
}

impl Registry {
    /// Build a registry with the default catalogs.
    pub fn with_options(options: &RegistryOptions) -> Self {
        let field_types = Arc::new(FieldTypeSpace::new(DEFAULT_SPACE));
        field_types.register_set(Arc::new(catalog::field_types::default_set()));
        field_types.register_set(Arc::new(catalog::field_types::provisional_set(options)));
        field_types.register_set(Arc::new(catalog::field_types::bigtiff_set()));

        let baseline = Arc::new(catalog::baseline::tags());
        let extended = Arc::new(catalog::extended::tags());
        let private_tags = Arc::new(catalog::private::tags());
        let exif = Arc::new(catalog::exif::exif_tags());

        let tags = Arc::new(TagSpace::new(DEFAULT_SPACE));
        tags.register_set(Arc::clone(&baseline));
        tags.register_set(Arc::clone(&extended));
        tags.register_set(Arc::clone(&private_tags));
        tags.register_set(Arc::clone(&exif));
        tags.register_set(Arc::new(catalog::geotiff::tags()));
        tags.register_set(Arc::new(catalog::modi::tags()));
        tags.register_set(Arc::new(catalog::tiffep::tags()));

        let exif_space = TagSpace::new(catalog::exif::EXIF_SPACE);
        exif_space.register_set(baseline);
        exif_space.register_set(extended);
        exif_space.register_set(exif);

        let gps_space = TagSpace::new(catalog::exif::GPS_SPACE);
        gps_space.register_set(Arc::new(catalog::exif::gps_tags()));

        let iop_space = TagSpace::new(catalog::exif::INTEROP_SPACE);
        iop_space.register_set(Arc::new(catalog::exif::interop_tags()));

        let registry = Self::new(tags, field_types, Arc::new(VersionRegistry::default()))
            .with_private_tags(private_tags);
        registry.register_tag_space(Arc::new(exif_space));
        registry.register_tag_space(Arc::new(gps_space));
        registry.register_tag_space(Arc::new(iop_space));
        registry
    }

    /// Assemble a registry from caller-built parts.
    ///
    /// The private tag set starts out empty; see
    /// [`with_private_tags`](Registry::with_private_tags).
    pub fn new(
        tags: Arc<TagSpace>,
        field_types: Arc<FieldTypeSpace>,
        versions: Arc<VersionRegistry>,
    ) -> Self {
        Self {
            tags,
            field_types,
            versions,
            private_tags: Arc::new(TagSet::new(catalog::private::SET_NAME, 32768, 65535)),
            tag_spaces: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn with_private_tags(mut self, private_tags: Arc<TagSet>) -> Self {
        self.private_tags = private_tags;
        self
    }

    /// The same registry with a different default tag space.
    pub fn with_tags(&self, tags: Arc<TagSpace>) -> Self {
        Self {
            tags,
            ..self.clone()
        }
    }

    /// The default tag space used for top-level directories.
    pub fn tags(&self) -> &Arc<TagSpace> {
        &self.tags
    }

    pub fn field_types(&self) -> &Arc<FieldTypeSpace> {
        &self.field_types
    }

    pub fn versions(&self) -> &Arc<VersionRegistry> {
        &self.versions
    }

    /// The open set for vendor tags (ids 32768 and up). It is never locked.
    pub fn private_tags(&self) -> &Arc<TagSet> {
        &self.private_tags
    }

    /// Make a named tag space available through [`tag_space`](Registry::tag_space).
    pub fn register_tag_space(&self, space: Arc<TagSpace>) {
        self.tag_spaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(space.name().to_string(), space);
    }

    /// Look up a tag space by name. `"Default"` is the default space.
    pub fn tag_space(&self, name: &str) -> Option<Arc<TagSpace>> {
        if name == self.tags.name() {
            return Some(Arc::clone(&self.tags));
        }
        self.tag_spaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Names of all tag spaces, the default one included.
    pub fn tag_space_names(&self) -> Vec<String> {
        let spaces = self.tag_spaces.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = spaces.keys().cloned().collect();
        if !names.iter().any(|n| n == self.tags.name()) {
            names.push(self.tags.name().to_string());
        }
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_options(&RegistryOptions::default())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tags", &self.tags)
            .field("field_types", &self.field_types)
            .field("versions", &self.versions.versions())
            .field("tag_spaces", &self.tag_space_names())
            .finish()
    }
}
