//! Spaces merge several sets into one id lookup.
//!
//! When two sets bind the same id to different names, the space logs a warning
//! and keeps going; the set registered last wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{trace, warn};

use super::set::{Registrable, RegistrySet};
use super::{FieldType, Tag};

/// A named aggregate of sets with a per-id cache.
pub struct RegistrySpace<T> {
    name: String,
    inner: RwLock<SpaceInner<T>>,
}

struct SpaceInner<T> {
    /// Sets in registration order.
    sets: Vec<Arc<RegistrySet<T>>>,
    /// Revision of each set when the cache was last known to be valid.
    revisions: Vec<u64>,
    cache: HashMap<u16, Cached<T>>,
}

struct Cached<T> {
    set: String,
    item: Arc<T>,
}

impl<T> Clone for Cached<T> {
    fn clone(&self) -> Self {
        Self {
            set: self.set.clone(),
            item: Arc::clone(&self.item),
        }
    }
}

/// A space of tags.
pub type TagSpace = RegistrySpace<Tag>;

/// A space of field types.
pub type FieldTypeSpace = RegistrySpace<FieldType>;

impl<T: Registrable> SpaceInner<T> {
    fn is_stale(&self) -> bool {
        self.sets
            .iter()
            .zip(&self.revisions)
            .any(|(set, rev)| set.revision() != *rev)
    }

    /// Drop cached entries and record the current set revisions.
    fn refresh(&mut self) {
        self.revisions = self.sets.iter().map(|s| s.revision()).collect();
        self.cache.clear();
    }

    /// Search the sets, newest first.
    fn search(&self, id: u16) -> Option<Cached<T>> {
        self.sets.iter().rev().find_map(|set| {
            set.get(id).map(|item| Cached {
                set: set.name().to_string(),
                item,
            })
        })
    }
}

impl<T: Registrable> RegistrySpace<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: RwLock::new(SpaceInner {
                sets: Vec::new(),
                revisions: Vec::new(),
                cache: HashMap::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merge a set into this space.
    ///
    /// A set with the same name as one already present takes its place.
    /// Entries that disagree with the current winner among the member sets
    /// are logged and then shadow it.
    pub fn register_set(&self, set: Arc<RegistrySet<T>>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let revision = set.revision();
        if let Some(pos) = inner.sets.iter().position(|s| s.name() == set.name()) {
            inner.sets.remove(pos);
            inner.revisions.remove(pos);
            inner.cache.retain(|_, cached| cached.set != set.name());
        }
        if inner.is_stale() {
            inner.refresh();
        }

        for (id, item) in set.entries() {
            if let Some(existing) = inner.search(id) {
                if existing.item.name() != item.name() {
                    warn!(
                        space = %self.name,
                        id,
                        name = item.name(),
                        set = set.name(),
                        existing = existing.item.name(),
                        existing_set = %existing.set,
                        "Registration conflict for {}",
                        T::KIND
                    );
                }
            }
            inner.cache.insert(
                id,
                Cached {
                    set: set.name().to_string(),
                    item,
                },
            );
        }

        inner.sets.push(set);
        inner.revisions.push(revision);
    }

    /// Resolve an id. Never fails: unknown ids yield a placeholder whose id
    /// matches the query. Placeholders are not cached.
    pub fn get(&self, id: u16) -> Arc<T> {
        match self.lookup(id) {
            Some(cached) => cached.item,
            None => {
                trace!(space = %self.name, id, "Unknown {}", T::KIND);
                Arc::new(T::placeholder(id))
            }
        }
    }

    /// Name of the set that provides `id`, if any.
    pub fn set_name_for(&self, id: u16) -> Option<String> {
        self.lookup(id).map(|cached| cached.set)
    }

    /// Look up a member set by name.
    pub fn set(&self, name: &str) -> Option<Arc<RegistrySet<T>>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.sets.iter().find(|s| s.name() == name).cloned()
    }

    /// Member set names in alphabetical order.
    pub fn set_names(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = inner.sets.iter().map(|s| s.name().to_string()).collect();
        names.sort();
        names
    }

    fn lookup(&self, id: u16) -> Option<Cached<T>> {
        {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if !inner.is_stale() {
                if let Some(hit) = inner.cache.get(&id) {
                    return Some(hit.clone());
                }
            }
        }

        // Cache miss or a member set changed since it was cached
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.is_stale() {
            inner.refresh();
        }
        if let Some(hit) = inner.cache.get(&id) {
            return Some(hit.clone());
        }
        let found = inner.search(id)?;
        inner.cache.insert(id, found.clone());
        Some(found)
    }
}

impl TagSpace {
    pub fn get_tag(&self, id: u16) -> Arc<Tag> {
        self.get(id)
    }

    pub fn tag_set_name_for(&self, id: u16) -> Option<String> {
        self.set_name_for(id)
    }

    pub fn tag_set(&self, name: &str) -> Option<Arc<RegistrySet<Tag>>> {
        self.set(name)
    }

    pub fn tag_set_names(&self) -> Vec<String> {
        self.set_names()
    }
}

impl FieldTypeSpace {
    pub fn get_field_type(&self, id: u16) -> Arc<FieldType> {
        self.get(id)
    }
}

impl<T: Registrable> fmt::Debug for RegistrySpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySpace")
            .field("kind", &T::KIND)
            .field("name", &self.name)
            .field("sets", &self.set_names())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
