//! Hash-backed associative store keyed by identifier.
//!
//! `AssociativeStore` is the index behind driver lookup and route history.
//! Each key maps to exactly one value; `put` replaces any previous entry.
//! Iteration order of [`AssociativeStore::values`] is unspecified.

use std::collections::HashMap;
use std::hash::Hash;

/// Unique-key mapping with average O(1) insertion and lookup.
///
/// # Examples
/// ```
/// use dispatch_core::AssociativeStore;
///
/// let mut store = AssociativeStore::new();
/// assert_eq!(store.put(1, "first"), None);
/// assert_eq!(store.put(1, "second"), Some("first"));
/// assert_eq!(store.get(&1), Some(&"second"));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AssociativeStore<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for AssociativeStore<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> AssociativeStore<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value for `key`, returning the replaced value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Return the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Return a mutable reference to the value for `key`, if present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Report whether `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over all stored values in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    /// Iterate over all stored keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_key_is_absent() {
        let store: AssociativeStore<u32, String> = AssociativeStore::new();
        assert!(store.get(&42).is_none());
        assert!(store.is_empty());
    }

    #[rstest]
    fn put_overwrites_existing_value() {
        let mut store = AssociativeStore::new();
        store.put(3, String::from("old"));
        let replaced = store.put(3, String::from("new"));
        assert_eq!(replaced.as_deref(), Some("old"));
        assert_eq!(store.get(&3).map(String::as_str), Some("new"));
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    fn values_cover_every_entry() {
        let mut store = AssociativeStore::new();
        for id in 1..=50_u32 {
            store.put(id, id * 10);
        }
        let mut values: Vec<u32> = store.values().copied().collect();
        values.sort_unstable();
        let expected: Vec<u32> = (1..=50).map(|id| id * 10).collect();
        assert_eq!(values, expected);
    }

    #[rstest]
    fn get_mut_updates_in_place() {
        let mut store = AssociativeStore::new();
        store.put(1, vec![1]);
        if let Some(entry) = store.get_mut(&1) {
            entry.push(2);
        }
        assert_eq!(store.get(&1), Some(&vec![1, 2]));
    }
}
