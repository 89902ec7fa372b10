use parking_lot::RwLock;
use std::{collections::hash_map::RandomState, hash::BuildHasher, sync::Arc};

use crate::ordered_map::OrderedMap;

/// Wrapper for an OrderedMap which is shareable across thread boundaries.
///
/// OrderedMap itself does no locking; this serializes access behind a
/// reader-writer lock. Clones share the same map.
pub struct SharedOrderedMap<V, S = RandomState>(pub(crate) Arc<RwLock<OrderedMap<V, S>>>);

impl<V> SharedOrderedMap<V, RandomState> {
    /// An empty shared map.
    pub fn new() -> Self {
        Self::with_map(OrderedMap::new())
    }
}

impl<V, S> SharedOrderedMap<V, S>
where
    S: BuildHasher,
{
    /// Wraps a map into a shared map accessor, making it safe to move across
    /// thread boundaries.
    pub fn with_map(map: OrderedMap<V, S>) -> Self {
        Self(Arc::new(RwLock::new(map)))
    }

    /// Sets the value for a key, returning the previous value if there was
    /// one. New keys go to the end of the order.
    pub fn set(&self, key: impl Into<String>, value: V) -> Option<V> {
        self.0.write().set(key, value)
    }

    /// Get the value for a key. This clones it to minimize the lock time of
    /// the map.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.0.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    /// Delete a key, returning its value if it existed.
    pub fn delete(&self, key: &str) -> Option<V> {
        self.0.write().delete(key)
    }

    /// Clears the map.
    pub fn clear(&self) {
        self.0.write().clear()
    }

    /// The number of entries in the map at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Copies out every entry, oldest first, under a single read lock.
    pub fn snapshot(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (k.to_owned(), v.clone()))
            .collect()
    }

    /// Runs `f` with shared access to the map. Other readers may run at the
    /// same time; writers wait.
    pub fn read<R>(&self, f: impl FnOnce(&OrderedMap<V, S>) -> R) -> R {
        f(&*self.0.read())
    }

    /// Runs `f` with exclusive access to the map.
    pub fn write<R>(&self, f: impl FnOnce(&mut OrderedMap<V, S>) -> R) -> R {
        f(&mut *self.0.write())
    }
}

impl<V, S> Clone for SharedOrderedMap<V, S> {
    fn clone(&self) -> Self {
        SharedOrderedMap(self.0.clone())
    }
}

impl<V> Default for SharedOrderedMap<V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> From<OrderedMap<V, S>> for SharedOrderedMap<V, S>
where
    S: BuildHasher,
{
    fn from(map: OrderedMap<V, S>) -> Self {
        Self::with_map(map)
    }
}
