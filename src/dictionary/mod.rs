//! Flat, string-keyed metadata dictionary.
//!
//! NRRD readers hand header fields over as a key/value dictionary. This module
//! defines the contract the DWI layer needs from such a dictionary
//! ([`MetaDataStore`]) and a default in-memory implementation
//! ([`MetaDataDictionary`]).

mod value;

pub use value::MetaDataValue;

use std::collections::BTreeMap;

/// Minimal key/value contract consumed by [`crate::DwiValidator`].
///
/// `keys` returns an owned snapshot so callers may erase entries while walking it.
pub trait MetaDataStore {
    /// Whether `key` is present.
    fn has(&self, key: &str) -> bool;
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&MetaDataValue>;
    /// Insert or overwrite `key`.
    fn set(&mut self, key: &str, value: MetaDataValue);
    /// Remove `key`, returning the old value.
    fn erase(&mut self, key: &str) -> Option<MetaDataValue>;
    /// Snapshot of all keys in the store's iteration order.
    fn keys(&self) -> Vec<String>;
}

impl<S: MetaDataStore + ?Sized> MetaDataStore for &mut S {
    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }

    fn get(&self, key: &str) -> Option<&MetaDataValue> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: MetaDataValue) {
        (**self).set(key, value);
    }

    fn erase(&mut self, key: &str) -> Option<MetaDataValue> {
        (**self).erase(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

/// In-memory metadata dictionary with sorted, stable key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaDataDictionary {
    entries: BTreeMap<String, MetaDataValue>,
}

impl MetaDataDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaDataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl MetaDataStore for MetaDataDictionary {
    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&MetaDataValue> {
        self.entries.get(key)
    }

    fn set(&mut self, key: &str, value: MetaDataValue) {
        self.entries.insert(key.to_string(), value);
    }

    fn erase(&mut self, key: &str) -> Option<MetaDataValue> {
        self.entries.remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<MetaDataValue>> FromIterator<(K, V)> for MetaDataDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
