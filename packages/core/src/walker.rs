//! Recursive subtree materialization.

use crate::{convert_if_really_list, ChildProxy, Error, KeyPath, StoreClient, Value, ValueMap};

/// Walks a store's tree through a [`StoreClient`].
///
/// Every call starts from scratch: nothing is cached between calls, and
/// fetches are issued serially, one round trip at a time. There is no
/// snapshot isolation across a walk; if another writer mutates the subtree
/// mid-walk the result can mix before and after states.
///
pub struct TreeWalker<S> {
    store: S,
}

impl<S: StoreClient> TreeWalker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Full key paths of the immediate children of `path`, in store order.
    ///
    /// A missing path or a leaf yields an empty list.
    pub fn list_keys(&self, path: &str) -> Result<Vec<String>, Error> {
        let path = KeyPath::new(path)?;
        let children = self.fetch(&path)?;
        Ok(children.into_iter().map(|child| child.key).collect())
    }

    /// Whether `path` has at least one child.
    ///
    /// This cannot tell a missing path, a leaf, and an empty directory
    /// apart: all three report `false`.
    pub fn is_directory(&self, path: &str) -> Result<bool, Error> {
        let path = KeyPath::new(path)?;
        Ok(!self.fetch(&path)?.is_empty())
    }

    /// Materialize the subtree under `path`.
    ///
    /// Each child is re-checked with its own fetch rather than classified
    /// from the listing. Sub-directories are materialized recursively and
    /// passed through [`convert_if_really_list`]; the top level itself is
    /// always returned as a map. The first store error aborts the walk.
    pub fn list_nested(&self, path: &str) -> Result<ValueMap, Error> {
        let path = KeyPath::new(path)?;
        self.nested(&path)
    }

    /// Like [`list_nested`](Self::list_nested), but also applies list
    /// inference to the top level.
    pub fn materialize(&self, path: &str) -> Result<Value, Error> {
        let path = KeyPath::new(path)?;
        let map = self.nested(&path)?;
        Ok(convert_if_really_list(path.as_str(), map))
    }

    fn nested(&self, path: &KeyPath) -> Result<ValueMap, Error> {
        let mut level = ValueMap::new();

        for child in self.fetch(path)? {
            let key = KeyPath::new(child.key)
                .map_err(|_| Error::protocol(format!("empty child key under {}", path)))?;
            let value = if !self.fetch(&key)?.is_empty() {
                let sub = self.nested(&key)?;
                convert_if_really_list(key.as_str(), sub)
            } else {
                match child.value {
                    Some(value) => Value::Leaf(value),
                    // A directory with no children.
                    None => Value::directory(),
                }
            };
            tracing::trace!(key = %key, leaf = value.is_leaf(), "child classified");
            level.insert(key.to_string(), value);
        }

        Ok(level)
    }

    fn fetch(&self, path: &KeyPath) -> Result<Vec<ChildProxy>, Error> {
        tracing::debug!(path = %path, "fetching children");
        self.store.fetch_children(path.as_str()).map_err(|e| {
            tracing::debug!(path = %path, error = %e, "fetch failed");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use crate::ErrorKind;

    fn walker<const N: usize>(pairs: [(&str, &str); N]) -> TreeWalker<MemoryStore> {
        TreeWalker::new(MemoryStore::from_pairs(pairs))
    }

    #[test]
    fn list_keys_in_store_order() {
        let w = walker([("/a/z", "1"), ("/a/b", "2"), ("/a/m/x", "3")]);
        assert_eq!(w.list_keys("/a").unwrap(), vec!["/a/z", "/a/b", "/a/m"]);
    }

    #[test]
    fn list_keys_of_leaf_and_missing_are_empty() {
        let w = walker([("/a/b", "1")]);
        assert!(w.list_keys("/a/b").unwrap().is_empty());
        assert!(w.list_keys("/nope").unwrap().is_empty());
        assert!(!w.is_directory("/a/b").unwrap());
        assert!(!w.is_directory("/nope").unwrap());
    }

    #[test]
    fn leaves_only() {
        let w = walker([("/a/x", "1"), ("/a/y", "2")]);
        let nested = w.list_nested("/a").unwrap();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested["/a/x"], Value::from("1"));
        assert_eq!(nested["/a/y"], Value::from("2"));
    }

    #[test]
    fn leaf_with_empty_value_is_kept() {
        let w = walker([("/a/x", "")]);
        let nested = w.list_nested("/a").unwrap();
        assert_eq!(nested["/a/x"], Value::from(""));
    }

    #[test]
    fn sub_list_converted() {
        let w = walker([("/a/p/0", "a"), ("/a/p/1", "b"), ("/a/p/2", "c")]);
        let nested = w.list_nested("/a").unwrap();
        assert_eq!(nested["/a/p"], Value::from(vec!["a", "b", "c"]));
    }

    #[test]
    fn sub_map_with_gap_kept() {
        let w = walker([("/a/p/0", "a"), ("/a/p/2", "c")]);
        let nested = w.list_nested("/a").unwrap();
        let p = nested["/a/p"].as_directory().unwrap();
        assert_eq!(p.keys().collect::<Vec<_>>(), vec!["/a/p/0", "/a/p/2"]);
    }

    #[test]
    fn top_level_never_converted_by_list_nested() {
        let w = walker([("/l/0", "a"), ("/l/1", "b")]);
        let nested = w.list_nested("/l").unwrap();
        assert_eq!(nested.len(), 2);

        assert_eq!(w.materialize("/l").unwrap(), Value::from(vec!["a", "b"]));
    }

    #[test]
    fn empty_directory_child_is_empty_map() {
        let mut store = MemoryStore::from_pairs([("/a/x", "1")]);
        store.insert_directory("/a/empty");
        let w = TreeWalker::new(store);

        let nested = w.list_nested("/a").unwrap();
        assert_eq!(nested["/a/empty"], Value::directory());

        assert!(w.list_nested("/a/empty").unwrap().is_empty());
    }

    #[test]
    fn every_child_is_rechecked() {
        let w = walker([("/a/x", "1"), ("/a/y", "2"), ("/a/d/z", "3")]);
        w.list_nested("/a").unwrap();
        // /a, then /a/x, /a/y, /a/d for classification, then /a/d again to
        // recurse, then /a/d/z for classification.
        assert_eq!(w.store().fetch_count(), 6);
    }

    #[test]
    fn invalid_argument_without_fetch() {
        let w = walker([("/a/x", "1")]);
        assert_eq!(
            w.list_keys("").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            w.is_directory("").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            w.list_nested("").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(w.store().fetch_count(), 0);
    }

    #[test]
    fn failure_mid_walk_aborts() {
        let mut store = MemoryStore::from_pairs([("/a/d/x", "1"), ("/a/y", "2")]);
        store.fail_after(2, Error::unavailable("connection reset"));
        let w = TreeWalker::new(store);

        let err = w.list_nested("/a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[test]
    fn protocol_error_propagates_unmodified() {
        let mut store = MemoryStore::from_pairs([("/a/x", "1")]);
        store.fail_after(0, Error::protocol("garbled"));
        let w = TreeWalker::new(store);

        assert_eq!(w.list_keys("/a").unwrap_err(), Error::protocol("garbled"));
    }
}
