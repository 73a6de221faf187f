//! Reading and writing nested values by path.
//!
//! Writes are copy-on-write through ownership: [`set`] and [`remove`]
//! consume the root and hand back the new root. Every object along the path
//! is taken out of its owner, rebuilt with the change applied, and swapped
//! back in at its original position, so key order is preserved and no other
//! part of the tree is touched. Each nested write costs O(depth).
//!
//! Paths address objects only: descending into an array or a scalar finds
//! nothing. When writing, an existing scalar (or array) on the way to the
//! target is replaced by a fresh object, since the path is authoritative.
//!
//! # Example
//!
//! ```
//! use yamlkit::document::element::{Element, NullPolicy, Object};
//! use yamlkit::path::resolver::{get, remove, set};
//!
//! let root = set(Object::new(), &["a", "b"], Element::from(1), NullPolicy::RemoveOnNull);
//! assert_eq!(get(&root, &["a", "b"]), Some(&Element::from(1)));
//!
//! let root = remove(root, &["a", "b"]);
//! assert_eq!(get(&root, &["a", "b"]), None);
//! ```

use crate::document::element::{Element, NullPolicy, Object};
use tracing::trace;

/// Looks up the element at `path`.
///
/// Returns `None` for an empty path, a missing key, or an intermediate
/// value that is not an object. A stored `Null` is returned as
/// `Some(&Element::Null)`.
pub fn get<'a, S: AsRef<str>>(root: &'a Object, path: &[S]) -> Option<&'a Element> {
    let (last, parents) = path.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get(segment.as_ref())?.as_object()?;
    }
    current.get(last.as_ref())
}

/// Writes `value` at `path` and returns the new root.
///
/// A one-segment path is a direct key assignment on `root`. Longer paths
/// rebuild each ancestor object, creating missing ones and replacing
/// non-object values. Under [`NullPolicy::RemoveOnNull`] a `Null` value is
/// exactly [`remove`]: nothing is created or replaced on the way. An empty
/// path returns `root` unchanged.
pub fn set<S: AsRef<str>>(root: Object, path: &[S], value: Element, policy: NullPolicy) -> Object {
    if value.is_null() && policy == NullPolicy::RemoveOnNull {
        return remove(root, path);
    }
    match path {
        [] => root,
        [key] => {
            let mut root = root;
            root.set(key.as_ref(), value, policy);
            root
        }
        [head, rest @ ..] => rebuild_child(root, head.as_ref(), |child| {
            set(child, rest, value, policy)
        }),
    }
}

/// Deletes the key at `path` and returns the new root.
///
/// Missing keys and non-object intermediates leave the tree unchanged; no
/// intermediate objects are created.
pub fn remove<S: AsRef<str>>(root: Object, path: &[S]) -> Object {
    match path {
        [] => root,
        [key] => {
            let mut root = root;
            root.remove(key.as_ref());
            root
        }
        [head, rest @ ..] => {
            let mut root = root;
            if let Some(slot @ Element::Object(_)) = root.get_mut(head.as_ref()) {
                if let Element::Object(child) = std::mem::take(slot) {
                    *slot = Element::Object(remove(child, rest));
                }
            }
            root
        }
    }
}

/// Takes the object stored under `key` out of `owner` (or a fresh one),
/// rebuilds it with `f` and puts the result back in the same position.
fn rebuild_child<F>(mut owner: Object, key: &str, f: F) -> Object
where
    F: FnOnce(Object) -> Object,
{
    match owner.get_mut(key) {
        Some(slot) => {
            let child = match std::mem::take(slot) {
                Element::Object(child) => child,
                other => {
                    trace!(key, replaced = other.kind_name(), "replacing value with object on path");
                    Object::new()
                }
            };
            *slot = Element::Object(f(child));
        }
        None => {
            owner.insert(key, Element::Object(f(Object::new())));
        }
    }
    owner
}

impl Object {
    /// Looks up a nested element. See [`get`].
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&Element> {
        get(self, path)
    }

    /// Writes a nested element in place. See [`set`].
    pub fn set_path<S: AsRef<str>>(&mut self, path: &[S], value: Element, policy: NullPolicy) {
        let root = std::mem::take(self);
        *self = set(root, path, value, policy);
    }

    /// Deletes a nested element in place. See [`remove`].
    pub fn remove_path<S: AsRef<str>>(&mut self, path: &[S]) {
        let root = std::mem::take(self);
        *self = remove(root, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::element::Array;

    const POLICY: NullPolicy = NullPolicy::RemoveOnNull;

    fn sample() -> Object {
        let mut inner = Object::new();
        inner.insert("b", 1);
        inner.insert("c", true);
        let mut root = Object::new();
        root.insert("a", inner);
        root.insert("z", "last");
        root
    }

    #[test]
    fn test_get_nested() {
        let root = sample();
        assert_eq!(get(&root, &["a", "b"]), Some(&Element::from(1)));
        assert_eq!(get(&root, &["a", "missing"]), None);
        assert_eq!(get(&root, &["missing", "b"]), None);
    }

    #[test]
    fn test_get_empty_path() {
        let root = sample();
        let empty: [&str; 0] = [];
        assert_eq!(get(&root, &empty), None);
    }

    #[test]
    fn test_get_through_scalar_is_none() {
        let root = sample();
        assert_eq!(get(&root, &["z", "anything"]), None);
    }

    #[test]
    fn test_get_through_array_is_none() {
        let mut root = Object::new();
        root.insert("list", Array::from(vec![Element::from(1)]));
        assert_eq!(get(&root, &["list", "0"]), None);
    }

    #[test]
    fn test_set_preserves_key_order() {
        let root = set(sample(), &["a", "b"], Element::from(2), POLICY);
        let keys: Vec<_> = root.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "z"]);
        let inner: Vec<_> = root
            .get("a")
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(inner, vec!["b", "c"]);
    }

    #[test]
    fn test_set_creates_missing_ancestors() {
        let root = set(Object::new(), &["x", "y", "z"], Element::from("deep"), POLICY);
        assert_eq!(get(&root, &["x", "y", "z"]), Some(&Element::from("deep")));
    }

    #[test]
    fn test_set_replaces_scalar_ancestor() {
        let root = set(sample(), &["a", "b", "c"], Element::from(3), POLICY);
        assert_eq!(get(&root, &["a", "b", "c"]), Some(&Element::from(3)));
        assert_eq!(get(&root, &["a", "c"]), Some(&Element::from(true)));
    }

    #[test]
    fn test_set_null_removes_with_remove_policy() {
        let root = set(sample(), &["a", "b"], Element::Null, NullPolicy::RemoveOnNull);
        assert_eq!(get(&root, &["a", "b"]), None);
    }

    #[test]
    fn test_set_null_keeps_scalar_on_path() {
        let root = set(sample(), &["z", "b"], Element::Null, NullPolicy::RemoveOnNull);
        assert_eq!(root, sample());
    }

    #[test]
    fn test_set_null_creates_no_ancestors() {
        let root = set(sample(), &["x", "y"], Element::Null, NullPolicy::RemoveOnNull);
        assert_eq!(root, sample());
    }

    #[test]
    fn test_set_null_stores_with_store_policy() {
        let root = set(sample(), &["a", "b"], Element::Null, NullPolicy::StoreNull);
        assert_eq!(get(&root, &["a", "b"]), Some(&Element::Null));
    }

    #[test]
    fn test_remove_missing_does_not_allocate() {
        let root = remove(sample(), &["nope", "b"]);
        assert_eq!(root, sample());
    }

    #[test]
    fn test_remove_leaves_scalar_intermediate() {
        let root = remove(sample(), &["z", "b"]);
        assert_eq!(root.get("z"), Some(&Element::from("last")));
    }

    #[test]
    fn test_in_place_helpers() {
        let mut root = sample();
        root.set_path(&["a", "d"], Element::from("x"), POLICY);
        assert_eq!(root.get_path(&["a", "d"]), Some(&Element::from("x")));
        root.remove_path(&["a", "d"]);
        assert_eq!(root.get_path(&["a", "d"]), None);
    }
}
