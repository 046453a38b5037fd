//! Key-value store used at every transaction layer.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// An ordered mapping from string keys to string values.
///
/// `Store` is the unit of state at every level of the transaction stack:
/// the committed base and each open layer are all plain stores. Cloning a
/// store produces a fully independent copy, which is what makes layering
/// safe.
///
/// Iteration is in lexicographic key order.
///
/// # Example
///
/// ```rust
/// use txkv_core::Store;
///
/// let mut store = Store::new();
/// store.set("foo", "123");
/// store.set("bar", "123");
/// assert_eq!(store.get("foo"), Some("123"));
/// assert_eq!(store.count_values("123"), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Store {
    entries: BTreeMap<String, String>,
}

impl Store {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, or [`CoreError::KeyNotSet`].
    pub fn try_get(&self, key: &str) -> CoreResult<&str> {
        self.get(key).ok_or_else(|| CoreError::key_not_set(key))
    }

    /// Sets `key` to `value`, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value. Removing an absent key is a no-op.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Counts entries whose value equals `target` exactly.
    #[must_use]
    pub fn count_values(&self, target: &str) -> usize {
        self.entries.values().filter(|v| v.as_str() == target).count()
    }

    /// Checks whether `key` is set.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Store
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
