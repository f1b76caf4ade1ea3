//! The Value type - a materialized subtree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::KeyPath;

/// One directory level: full child key path to child value.
pub type ValueMap = BTreeMap<String, Value>;

/// A materialized node of the store's tree.
///
/// # Design Notes
///
/// - Three variants and nothing else: a leaf string is never confused with
///   a single-entry map, and a list is only ever produced by list inference.
/// - `Directory` uses `BTreeMap`. The store's child order is not part of
///   the contract, so a deterministic sorted order is used instead.
/// - Serializes untagged: a leaf is a JSON string, a directory an object,
///   a list an array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A leaf key's string value.
    Leaf(String),
    /// A directory level keyed by full child key path.
    Directory(ValueMap),
    /// A directory whose children were `0..n` with no gaps, in index order.
    List(Vec<Value>),
}

impl Value {
    /// Create an empty directory.
    pub fn directory() -> Self {
        Value::Directory(BTreeMap::new())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Value::Leaf(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Value::Directory(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Value::Leaf(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_directory(&self) -> Option<&ValueMap> {
        match self {
            Value::Directory(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Number of direct children; zero for a leaf.
    pub fn len(&self) -> usize {
        match self {
            Value::Leaf(_) => 0,
            Value::Directory(map) => map.len(),
            Value::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of this value with every directory key reduced to its last
    /// path segment, recursively.
    ///
    /// Sibling keys share their parent prefix, so the trimmed keys remain
    /// unique within a level.
    ///
    /// ```rust
    /// use kvtree_core::Value;
    ///
    /// let nested = Value::Directory(
    ///     [("/app/name".to_string(), Value::from("demo"))].into_iter().collect(),
    /// );
    /// let trimmed = nested.trim_key_paths();
    /// assert_eq!(trimmed.as_directory().unwrap().get("name"), Some(&Value::from("demo")));
    /// ```
    #[must_use]
    pub fn trim_key_paths(&self) -> Value {
        match self {
            Value::Leaf(s) => Value::Leaf(s.clone()),
            Value::Directory(map) => Value::Directory(trim_keys(map)),
            Value::List(items) => Value::List(items.iter().map(Value::trim_key_paths).collect()),
        }
    }
}

/// [`Value::trim_key_paths`] for a bare directory level.
pub fn trim_keys(map: &ValueMap) -> ValueMap {
    map.iter()
        .map(|(key, value)| (trim_key(key), value.trim_key_paths()))
        .collect()
}

fn trim_key(key: &str) -> String {
    match KeyPath::new(key) {
        Ok(path) => path.last_segment().to_string(),
        Err(_) => key.to_string(),
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::directory()
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Leaf(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Leaf(v.to_string())
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::Directory(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}
