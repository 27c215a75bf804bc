//! Keyed storage for host-loaded resources (textures, fonts, sound buffers).

use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::error::EmberResult;

/// Owns resources of one kind, keyed by a caller-chosen id.
///
/// Lookup by [`get`](Self::get) treats a missing id as a programming error
/// and panics; use [`try_get`](Self::try_get) when absence is expected.
pub struct ResourceHolder<Id, R> {
    resources: BTreeMap<Id, R>,
}

impl<Id: Ord + fmt::Debug, R> Default for ResourceHolder<Id, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Ord + fmt::Debug, R> ResourceHolder<Id, R> {
    /// Empty holder.
    pub fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    /// Store an already-built resource under `id`, replacing any previous one.
    pub fn insert(&mut self, id: Id, resource: R) {
        self.resources.insert(id, resource);
    }

    /// Build a resource with `loader` and store it under `id`.
    ///
    /// Loader failures are recoverable and leave the holder unchanged.
    pub fn load(&mut self, id: Id, loader: impl FnOnce() -> EmberResult<R>) -> EmberResult<()> {
        let resource = loader()?;
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Remove and return the resource under `id`.
    pub fn unload(&mut self, id: &Id) -> Option<R> {
        self.resources.remove(id)
    }

    /// The resource under `id`.
    ///
    /// # Panics
    ///
    /// Panics when nothing is stored under `id`.
    pub fn get(&self, id: &Id) -> &R {
        self.resources
            .get(id)
            .unwrap_or_else(|| panic!("no resource stored under id {id:?}"))
    }

    /// Mutable access to the resource under `id`.
    ///
    /// # Panics
    ///
    /// Panics when nothing is stored under `id`.
    pub fn get_mut(&mut self, id: &Id) -> &mut R {
        self.resources
            .get_mut(id)
            .unwrap_or_else(|| panic!("no resource stored under id {id:?}"))
    }

    /// The resource under `id`, if stored.
    pub fn try_get(&self, id: &Id) -> Option<&R> {
        self.resources.get(id)
    }

    /// Whether a resource is stored under `id`.
    pub fn contains(&self, id: &Id) -> bool {
        self.resources.contains_key(id)
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the holder is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/unit/resource.rs"]
mod tests;
