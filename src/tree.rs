//! Dot-path operations over nested locale trees.
//!
//! A locale tree is a JSON object whose leaves are strings and whose interior
//! nodes are objects, addressed by dot-joined paths (`"a.b.c"`). The functions
//! here are pure: [`deep_merge`] returns a new tree rather than mutating either
//! input, so callers never alias a half-merged structure.
//!
//! Key order matters. Trees use `serde_json`'s order-preserving map, and
//! [`flatten_keys`] walks siblings in insertion order, so repeated exports of
//! an untouched store are byte-identical.

use serde_json::{Map, Value};

/// A per-language translation tree for one namespace.
pub type LocaleTree = Map<String, Value>;

/// Precedence for leaf conflicts during [`deep_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Freshly-imported values win over what is already on disk.
    #[default]
    PreferImported,
    /// A non-empty on-disk value survives; imported values only fill gaps.
    PreferExisting,
}

/// Returns the dot-path of every leaf in `tree`, pre-order, siblings in
/// insertion order.
pub fn flatten_keys(tree: &LocaleTree) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(tree, "", &mut keys);
    keys
}

fn collect_keys(tree: &LocaleTree, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(child) => collect_keys(child, &path, out),
            _ => out.push(path),
        }
    }
}

/// Walks `dot_path` segment by segment and returns the string leaf it lands
/// on. Returns `None` if any segment is missing or the leaf is not a string.
pub fn get_value<'a>(tree: &'a LocaleTree, dot_path: &str) -> Option<&'a str> {
    match dot_path.split_once('.') {
        None => tree.get(dot_path)?.as_str(),
        Some((head, rest)) => get_value(tree.get(head)?.as_object()?, rest),
    }
}

/// Sets a leaf at `dot_path`, creating intermediate objects as needed.
///
/// Empty values are a no-op (returns `false`): an empty CSV cell must never
/// blank out an existing translation. A non-object node sitting in the middle
/// of a deeper path is replaced by an object.
pub fn set_value(tree: &mut LocaleTree, dot_path: &str, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    match dot_path.split_once('.') {
        None => {
            tree.insert(dot_path.to_string(), Value::String(value.to_string()));
            true
        }
        Some((head, rest)) => {
            let entry = tree
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            match entry {
                Value::Object(child) => set_value(child, rest, value),
                _ => false,
            }
        }
    }
}

/// Merges `overlay` onto `base`, returning a new tree.
///
/// Keys present as objects on both sides merge recursively. Leaf conflicts
/// resolve per `policy`; keys unique to either side are kept as-is.
pub fn deep_merge(base: &LocaleTree, overlay: &LocaleTree, policy: MergePolicy) -> LocaleTree {
    let mut merged = base.clone();
    for (key, incoming) in overlay {
        match (merged.get(key), incoming) {
            (Some(Value::Object(existing)), Value::Object(child)) => {
                let combined = deep_merge(existing, child, policy);
                merged.insert(key.clone(), Value::Object(combined));
            }
            (Some(existing), _) => {
                let keep_existing = policy == MergePolicy::PreferExisting
                    && existing.as_str().is_some_and(|s| !s.is_empty());
                if !keep_existing {
                    merged.insert(key.clone(), incoming.clone());
                }
            }
            (None, _) => {
                merged.insert(key.clone(), incoming.clone());
            }
        }
    }
    merged
}
