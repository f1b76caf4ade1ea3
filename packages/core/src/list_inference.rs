//! Reinterpreting index-named directories as lists.
//!
//! The store has no list type. Lists are conventionally written as a
//! directory whose children are `0`, `1`, ..., `n-1`. This module recovers
//! that convention for one materialized directory level.

use crate::{KeyPath, Value, ValueMap};

/// Return `map` as a [`Value::List`] if its keys are exactly
/// `{level_key}/0` .. `{level_key}/{n-1}`, otherwise as a [`Value::Directory`].
///
/// The check is strict: any gap, a non-zero start, or an extra non-index
/// key keeps the map. An empty map stays an empty directory.
///
/// ```rust
/// use kvtree_core::{convert_if_really_list, Value, ValueMap};
///
/// let mut map = ValueMap::new();
/// map.insert("/l/1".to_string(), Value::from("b"));
/// map.insert("/l/0".to_string(), Value::from("a"));
/// assert_eq!(convert_if_really_list("/l", map), Value::from(vec!["a", "b"]));
/// ```
pub fn convert_if_really_list(level_key: &str, mut map: ValueMap) -> Value {
    if map.is_empty() {
        return Value::Directory(map);
    }

    let level = match KeyPath::new(level_key) {
        Ok(level) => level,
        Err(_) => return Value::Directory(map),
    };

    let candidates: Vec<String> = (0..map.len()).map(|i| level.index_child(i)).collect();
    if !candidates.iter().all(|key| map.contains_key(key)) {
        return Value::Directory(map);
    }

    tracing::debug!(key = %level, len = candidates.len(), "directory converted to list");

    let items = candidates
        .iter()
        .filter_map(|key| map.remove(key))
        .collect();
    Value::List(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map<const N: usize>(entries: [(&str, Value); N]) -> ValueMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn contiguous_indices_become_list() {
        let m = map([
            ("/p/0", Value::from("a")),
            ("/p/1", Value::from("b")),
            ("/p/2", Value::from("c")),
        ]);
        assert_eq!(
            convert_if_really_list("/p", m),
            Value::from(vec!["a", "b", "c"])
        );
    }

    #[test]
    fn numeric_order_not_lexical() {
        // BTreeMap iterates "/p/10" before "/p/2"; the list must not.
        let entries: ValueMap = (0..12)
            .map(|i| (format!("/p/{}", i), Value::from(i.to_string())))
            .collect();
        let converted = convert_if_really_list("/p", entries);
        let items = converted.as_list().unwrap();
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.as_leaf(), Some(i.to_string().as_str()));
        }
    }

    #[test]
    fn gap_keeps_map() {
        let m = map([("/p/0", Value::from("a")), ("/p/2", Value::from("c"))]);
        let result = convert_if_really_list("/p", m.clone());
        assert_eq!(result, Value::Directory(m));
    }

    #[test]
    fn non_zero_start_keeps_map() {
        let m = map([("/p/1", Value::from("a")), ("/p/2", Value::from("b"))]);
        assert!(convert_if_really_list("/p", m).is_directory());
    }

    #[test]
    fn named_key_alongside_zero_keeps_map() {
        let m = map([("/p/0", Value::from("a")), ("/p/name", Value::from("b"))]);
        assert!(convert_if_really_list("/p", m).is_directory());
    }

    #[test]
    fn empty_map_stays_directory() {
        let result = convert_if_really_list("/p", ValueMap::new());
        assert_eq!(result, Value::directory());
    }

    #[test]
    fn keys_from_another_level_do_not_count() {
        let m = map([("/q/0", Value::from("a"))]);
        assert!(convert_if_really_list("/p", m).is_directory());
    }

    #[test]
    fn nested_values_preserved() {
        let inner = Value::Directory(map([("/p/0/x", Value::from("1"))]));
        let m = map([("/p/0", inner.clone()), ("/p/1", Value::from("leaf"))]);
        assert_eq!(
            convert_if_really_list("/p", m),
            Value::List(vec![inner, Value::from("leaf")])
        );
    }
}
