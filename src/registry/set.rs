//! Named, lockable collections of tags or field types.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::RegistryError;

use super::{FieldType, Tag};

/// Something that can be registered in a [`RegistrySet`].
pub trait Registrable: Send + Sync + 'static {
    /// Used in log messages ("tag", "field type").
    const KIND: &'static str;

    fn id(&self) -> u16;

    fn name(&self) -> &str;

    /// Stand-in returned by a space for an id that no set knows.
    fn placeholder(id: u16) -> Self;

    /// Whether `incoming` may replace `self` under the same id in one set.
    fn check_replace(&self, incoming: &Self, set: &str) -> Result<(), RegistryError>;
}

/// A named mapping from id to entry, bounded by an inclusive id range.
///
/// Sets accept registrations until [`lock`](RegistrySet::lock) is called.
/// After that every registration fails and the contents stay as they were.
pub struct RegistrySet<T> {
    name: String,
    bounds: RangeInclusive<u16>,
    inner: RwLock<SetInner<T>>,
    revision: AtomicU64,
}

struct SetInner<T> {
    locked: bool,
    entries: BTreeMap<u16, Arc<T>>,
}

/// A set of tags.
pub type TagSet = RegistrySet<Tag>;

/// A set of field types.
pub type FieldTypeSet = RegistrySet<FieldType>;

impl TagSet {
    /// Create an empty, unlocked tag set accepting ids in `lower..=upper`.
    pub fn new(name: impl Into<String>, lower: u16, upper: u16) -> Self {
        Self::with_bounds(name, lower..=upper)
    }
}

impl FieldTypeSet {
    /// Create an empty, unlocked field type set. Any id is accepted.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_bounds(name, 0..=u16::MAX)
    }
}

impl<T: Registrable> RegistrySet<T> {
    fn with_bounds(name: impl Into<String>, bounds: RangeInclusive<u16>) -> Self {
        Self {
            name: name.into(),
            bounds,
            inner: RwLock::new(SetInner {
                locked: false,
                entries: BTreeMap::new(),
            }),
            revision: AtomicU64::new(0),
        }
    }

    /// Build a set from a fixed catalog, optionally locking it.
    ///
    /// Entries outside the bounds are skipped with a warning.
    pub(crate) fn preloaded(
        name: impl Into<String>,
        bounds: RangeInclusive<u16>,
        items: impl IntoIterator<Item = T>,
        locked: bool,
    ) -> Self {
        let name = name.into();
        let mut entries = BTreeMap::new();
        for item in items {
            if !bounds.contains(&item.id()) {
                tracing::warn!(
                    set = %name,
                    id = item.id(),
                    "Skipping {} outside set bounds",
                    T::KIND
                );
                continue;
            }
            entries.insert(item.id(), Arc::new(item));
        }
        Self {
            name,
            bounds,
            inner: RwLock::new(SetInner { locked, entries }),
            revision: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive id range accepted by this set.
    pub fn bounds(&self) -> RangeInclusive<u16> {
        self.bounds.clone()
    }

    /// Add an entry.
    ///
    /// Re-registering an id with an identical name (and size, for field
    /// types) replaces the entry; anything else under the same id is a
    /// conflict.
    pub fn register(&self, item: T) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.locked {
            return Err(RegistryError::Locked {
                set: self.name.clone(),
            });
        }

        let id = item.id();
        if !self.bounds.contains(&id) {
            return Err(RegistryError::OutOfRange {
                set: self.name.clone(),
                id,
                lower: *self.bounds.start(),
                upper: *self.bounds.end(),
            });
        }

        if let Some(existing) = inner.entries.get(&id) {
            existing.check_replace(&item, &self.name)?;
        }

        inner.entries.insert(id, Arc::new(item));
        self.revision.fetch_add(1, Ordering::Release);
        Ok(())
    }

    /// Prevent any further registration.
    pub fn lock(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .locked
    }

    pub fn get(&self, id: u16) -> Option<Arc<T>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .get(&id)
            .cloned()
    }

    pub fn contains(&self, id: u16) -> bool {
        self.get(id).is_some()
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<u16> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .keys()
            .copied()
            .collect()
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = inner
            .entries
            .values()
            .map(|e| e.name().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all entries in id order.
    pub(crate) fn entries(&self) -> Vec<(u16, Arc<T>)> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(id, e)| (*id, Arc::clone(e)))
            .collect()
    }

    /// Bumped on every successful registration.
    pub(crate) fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }
}

impl<T: Registrable> fmt::Debug for RegistrySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySet")
            .field("kind", &T::KIND)
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .field("len", &self.len())
            .field("locked", &self.is_locked())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
