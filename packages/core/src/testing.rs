//! In-memory [`StoreClient`] for tests.
//!
//! Enabled under `cfg(test)` and with the `test-utils` feature.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{ChildProxy, Error, StoreClient};

/// A flat key/value fake of the store.
///
/// Directories are implied by key prefixes, as in the real store. Keys keep
/// insertion order, so children are listed in the order they were added.
/// Every `fetch_children` call is counted, including failed ones.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// `None` marks an explicitly created, possibly empty, directory.
    entries: Vec<(String, Option<String>)>,
    fetches: AtomicUsize,
    failure: Option<(usize, Error)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::new();
        for (key, value) in pairs {
            store.insert_leaf(key, value);
        }
        store
    }

    pub fn insert_leaf(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.upsert(key.into(), Some(value.into()));
    }

    pub fn insert_directory(&mut self, key: impl Into<String>) {
        self.upsert(key.into(), None);
    }

    /// Remove `key` and everything under it.
    pub fn remove(&mut self, key: &str) {
        let prefix = format!("{}/", key.trim_end_matches('/'));
        self.entries
            .retain(|(k, _)| k != key && !k.starts_with(&prefix));
    }

    /// Let `successes` fetches through, then fail every later one with `error`.
    pub fn fail_after(&mut self, successes: usize, error: Error) {
        self.failure = Some((successes, error));
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn reset_count(&self) {
        self.fetches.store(0, Ordering::SeqCst);
    }

    fn upsert(&mut self, key: String, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    fn leaf_value(&self, key: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.clone())
    }
}

impl StoreClient for MemoryStore {
    fn fetch_children(&self, path: &str) -> Result<Vec<ChildProxy>, Error> {
        let attempt = self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some((successes, error)) = &self.failure {
            if attempt >= *successes {
                return Err(error.clone());
            }
        }

        let base = path.trim_end_matches('/');
        let prefix = format!("{}/", base);

        let mut children: Vec<ChildProxy> = Vec::new();
        for (key, _) in &self.entries {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            let Some(segment) = rest.split('/').find(|s| !s.is_empty()) else {
                continue;
            };
            let child_key = format!("{}{}", prefix, segment);
            if children.iter().any(|c| c.key == child_key) {
                continue;
            }
            let value = self.leaf_value(&child_key);
            children.push(ChildProxy {
                key: child_key,
                value,
            });
        }

        Ok(children)
    }
}
