//! Insertion-ordered keyed storage with merge-on-repeat

use indexmap::map::{IntoIter, Iter, Keys};
use indexmap::IndexMap;
use std::hash::Hash;

/// Mapping that keeps first-seen key order.
///
/// Merging a value under a key that is already present extends the
/// sequence stored there instead of replacing it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedStorage<K: Hash + Eq, V>(IndexMap<K, Vec<V>>);

impl<K: Hash + Eq, V> Default for KeyedStorage<K, V> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<K: Hash + Eq, V> KeyedStorage<K, V> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new storage with room for `capacity` distinct keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Inserts `key` at the end, or appends `value` to its existing sequence
    pub fn merge(&mut self, key: K, value: V) {
        self.0.entry(key).or_default().push(value);
    }

    /// Every value merged under `key`, in merge order
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of distinct keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> Keys<'_, K, Vec<V>> {
        self.0.keys()
    }

    pub fn iter(&self) -> Iter<'_, K, Vec<V>> {
        self.0.iter()
    }
}

impl<K: Hash + Eq, V> IntoIterator for KeyedStorage<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = IntoIter<K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a KeyedStorage<K, V> {
    type Item = (&'a K, &'a Vec<V>);
    type IntoIter = Iter<'a, K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for KeyedStorage<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut storage = Self::new();
        for (key, value) in iter {
            storage.merge(key, value);
        }
        storage
    }
}
