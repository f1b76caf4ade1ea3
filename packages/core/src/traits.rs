//! The store seam: single-level child listing.

use std::sync::Arc;

use crate::Error;

/// A child as returned by a single-level listing.
///
/// The key is the child's full key path. If the child is itself a
/// directory its own children are NOT populated; the walker fetches them
/// with a separate call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildProxy {
    /// Full key path of the child.
    pub key: String,
    /// The leaf value, if the store reported one.
    pub value: Option<String>,
}

impl ChildProxy {
    pub fn leaf(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// A child the store reported without a value (a directory).
    pub fn directory(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

/// Read access to one level of the store's tree.
///
/// # Contract
///
/// - `Ok(vec![])` if `path` does not exist or is a leaf. Directory-ness is
///   inferred from the presence of children, not from metadata.
/// - Children are returned in the store's order.
/// - Transport failures are [`Error::StoreUnavailable`], malformed responses
///   [`Error::StoreProtocolError`].
///
/// Implementations are shared across threads, so the receiver is `&self`.
pub trait StoreClient: Send + Sync {
    fn fetch_children(&self, path: &str) -> Result<Vec<ChildProxy>, Error>;
}

impl<T: StoreClient + ?Sized> StoreClient for &T {
    fn fetch_children(&self, path: &str) -> Result<Vec<ChildProxy>, Error> {
        (**self).fetch_children(path)
    }
}

impl<T: StoreClient + ?Sized> StoreClient for Box<T> {
    fn fetch_children(&self, path: &str) -> Result<Vec<ChildProxy>, Error> {
        (**self).fetch_children(path)
    }
}

impl<T: StoreClient + ?Sized> StoreClient for Arc<T> {
    fn fetch_children(&self, path: &str) -> Result<Vec<ChildProxy>, Error> {
        (**self).fetch_children(path)
    }
}
