//! Flat view of a nested document
//!
//! Flattening turns every leaf of the tree into one `(KeyPath, value)` entry,
//! in document order. Reconstruction inserts the entries back along their
//! paths, creating mappings in first-seen order, so
//! `reconstruct(flatten(tree)) == tree` including key order.
//!
//! An empty mapping has no leaves of its own; it is kept as an entry whose
//! value is the empty mapping so that flattening loses nothing.
//!
//! # Examples
//!
//! ```
//! use choice_content::{FlatDocument, KeyPath};
//! use serde_json::json;
//!
//! let tree = json!({"mode": {"selection": "fast", "fast": 10}});
//! let mut flat = FlatDocument::flatten(tree.as_object().unwrap());
//! assert_eq!(flat.len(), 2);
//!
//! flat.set(KeyPath::from(["mode", "selection"]), json!("slow")).unwrap();
//! let rebuilt = flat.reconstruct().unwrap();
//! assert_eq!(rebuilt["mode"]["selection"], json!("slow"));
//! assert_eq!(rebuilt["mode"]["fast"], json!(10));
//! ```

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::path::KeyPath;

/// Single-level view of a document keyed by full key paths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatDocument {
    entries: Vec<(KeyPath, Value)>,
}

impl FlatDocument {
    /// Flatten a root mapping, one entry per leaf.
    pub fn flatten(root: &Map<String, Value>) -> Self {
        let mut entries = Vec::new();
        flatten_into(&KeyPath::new(), root, &mut entries);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyPath, &Value)> {
        self.entries.iter().map(|(path, value)| (path, value))
    }

    /// Leaf value stored under exactly `path`
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == path)
            .map(|(_, value)| value)
    }

    /// Set the leaf at `path`.
    ///
    /// Any subtree currently under `path` is replaced. A non-empty mapping
    /// value is stored as a subtree. The parent chain of `path` must already
    /// exist as mappings; no intermediate mapping is created.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `path` is empty, passes through a terminal,
    /// or its parent mapping does not exist. The flat view is unchanged on
    /// error.
    pub fn set(&mut self, path: KeyPath, value: Value) -> Result<()> {
        let Some(parent) = path.parent() else {
            return Err(Error::invalid_path(path, "path is empty"));
        };

        // Ancestors stored as leaves: empty mappings may be filled, terminals may not
        let mut hollow_ancestors = Vec::new();
        for (index, (entry, entry_value)) in self.entries.iter().enumerate() {
            if !entry.is_strict_prefix_of(&path) {
                continue;
            }
            match entry_value {
                Value::Object(map) if map.is_empty() => hollow_ancestors.push(index),
                _ => {
                    return Err(Error::invalid_path(
                        path,
                        format!("{entry} is a terminal, not a group"),
                    ));
                }
            }
        }

        if !parent.is_empty() && !self.has_mapping(&parent) {
            return Err(Error::invalid_path(
                path,
                format!("parent {parent} does not exist"),
            ));
        }

        let mut position = None;
        let mut index = 0;
        self.entries.retain(|(entry, _)| {
            let remove = path.is_prefix_of(entry) || hollow_ancestors.contains(&index);
            if remove && position.is_none() {
                position = Some(index);
            }
            index += 1;
            !remove
        });
        // Nothing before the first removed entry moved, so its index is still valid
        let position = position.unwrap_or(self.entries.len());

        let replacement = match value {
            Value::Object(map) if !map.is_empty() => {
                let mut subtree = Vec::new();
                flatten_into(&path, &map, &mut subtree);
                subtree
            }
            leaf => vec![(path, leaf)],
        };
        self.entries.splice(position..position, replacement);
        Ok(())
    }

    /// Rebuild the nested tree from the entries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for an empty entry path, an entry that passes
    /// through another entry's terminal, or two entries claiming the same key.
    pub fn reconstruct(&self) -> Result<Map<String, Value>> {
        let mut root = Map::new();
        for (path, value) in &self.entries {
            insert_at(&mut root, path, value.clone())?;
        }
        Ok(root)
    }

    /// True if `path` currently addresses a mapping
    fn has_mapping(&self, path: &KeyPath) -> bool {
        self.entries.iter().any(|(entry, value)| {
            path.is_strict_prefix_of(entry)
                || (entry == path && matches!(value, Value::Object(map) if map.is_empty()))
        })
    }
}

impl FromIterator<(KeyPath, Value)> for FlatDocument {
    fn from_iter<I: IntoIterator<Item = (KeyPath, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FlatDocument {
    type Item = (KeyPath, Value);
    type IntoIter = std::vec::IntoIter<(KeyPath, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn flatten_into(prefix: &KeyPath, map: &Map<String, Value>, out: &mut Vec<(KeyPath, Value)>) {
    for (key, value) in map {
        let path = prefix.child(key.clone());
        match value {
            Value::Object(child) if !child.is_empty() => flatten_into(&path, child, out),
            leaf => out.push((path, leaf.clone())),
        }
    }
}

fn insert_at(root: &mut Map<String, Value>, path: &KeyPath, value: Value) -> Result<()> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(Error::invalid_path(path, "path is empty"));
    };

    let mut cursor = root;
    for (depth, segment) in parents.iter().enumerate() {
        let node = cursor
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        cursor = match node {
            Value::Object(map) => map,
            _ => {
                let blocking = KeyPath::from(&parents[..=depth]);
                return Err(Error::invalid_path(
                    path,
                    format!("{blocking} is a terminal, not a group"),
                ));
            }
        };
    }

    if cursor.contains_key(last) {
        return Err(Error::invalid_path(path, "conflicts with another entry"));
    }
    cursor.insert(last.clone(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn root(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_flatten_emits_one_entry_per_leaf() {
        let tree = root(json!({
            "mode": {"selection": "fast", "fast": 10, "slow": {"value": 20, "a": 1}},
            "name": "demo"
        }));
        let flat = FlatDocument::flatten(&tree);
        let paths: Vec<String> = flat.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "mode.selection",
                "mode.fast",
                "mode.slow.value",
                "mode.slow.a",
                "name"
            ]
        );
    }

    #[test]
    fn test_empty_mapping_survives() {
        let tree = root(json!({"a": {}, "b": {"c": {}}}));
        let flat = FlatDocument::flatten(&tree);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.reconstruct().unwrap(), tree);
    }

    #[test]
    fn test_set_new_key_under_existing_parent() {
        let tree = root(json!({"mode": {"fast": 10}, "other": 1}));
        let mut flat = FlatDocument::flatten(&tree);
        flat.set(KeyPath::from(["mode", "selection"]), json!("fast"))
            .unwrap();
        assert_eq!(
            Value::Object(flat.reconstruct().unwrap()),
            json!({"mode": {"fast": 10, "selection": "fast"}, "other": 1})
        );
    }

    #[test]
    fn test_set_through_terminal_fails_and_leaves_view() {
        let tree = root(json!({"mode": {"fast": 10}}));
        let mut flat = FlatDocument::flatten(&tree);
        let before = flat.clone();
        let err = flat
            .set(KeyPath::from(["mode", "fast", "x"]), json!(1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert_eq!(flat, before);
    }

    #[test]
    fn test_set_missing_parent_fails() {
        let tree = root(json!({"mode": {"fast": 10}}));
        let mut flat = FlatDocument::flatten(&tree);
        let err = flat
            .set(KeyPath::from(["missing", "selection"]), json!("x"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_set_replaces_subtree_in_place() {
        let tree = root(json!({"mode": {"slow": {"value": 20, "a": 1}, "fast": 10}}));
        let mut flat = FlatDocument::flatten(&tree);
        flat.set(KeyPath::from(["mode", "slow"]), json!(5)).unwrap();
        let rebuilt = flat.reconstruct().unwrap();
        let keys: Vec<_> = rebuilt["mode"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["slow", "fast"]);
        assert_eq!(rebuilt["mode"]["slow"], json!(5));
    }

    #[test]
    fn test_set_fills_empty_mapping() {
        let tree = root(json!({"mode": {}, "after": true}));
        let mut flat = FlatDocument::flatten(&tree);
        flat.set(KeyPath::from(["mode", "selection"]), json!("a"))
            .unwrap();
        assert_eq!(
            Value::Object(flat.reconstruct().unwrap()),
            json!({"mode": {"selection": "a"}, "after": true})
        );
    }

    #[test]
    fn test_set_mapping_value_becomes_subtree() {
        let tree = root(json!({"mode": {"fast": 10}}));
        let mut flat = FlatDocument::flatten(&tree);
        flat.set(
            KeyPath::from(["mode", "slow"]),
            json!({"value": 20, "selection": "a", "a": 1}),
        )
        .unwrap();
        assert_eq!(flat.get(&KeyPath::from(["mode", "slow", "a"])), Some(&json!(1)));
        assert_eq!(
            flat.reconstruct().unwrap()["mode"]["slow"],
            json!({"value": 20, "selection": "a", "a": 1})
        );
    }

    #[test]
    fn test_reconstruct_rejects_conflicting_entries() {
        let flat: FlatDocument = vec![
            (KeyPath::from(["a"]), json!(1)),
            (KeyPath::from(["a", "b"]), json!(2)),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            flat.reconstruct(),
            Err(Error::InvalidPath { .. })
        ));
    }
}
