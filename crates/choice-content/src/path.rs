//! Key paths into a nested document
//!
//! A [`KeyPath`] is an ordered sequence of mapping keys, root to leaf. Paths
//! are compared segment by segment, so a key containing `.` never collides
//! with a deeper path.
//!
//! # Examples
//!
//! ```
//! use choice_content::path::{KeyPath, get_at_path};
//! use serde_json::json;
//!
//! let path = KeyPath::from(["mode", "slow", "selection"]);
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.to_string(), "mode.slow.selection");
//!
//! let doc = json!({"mode": {"slow": {"selection": "a"}}});
//! let root = doc.as_object().unwrap();
//! assert_eq!(get_at_path(root, path.segments()), Some(&json!("a")));
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// An ordered sequence of mapping keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dotted text (`mode.slow.selection`) into a path.
    ///
    /// Empty segments are skipped, so `a..b` and `.a.b` both give `[a, b]`.
    /// Keys that themselves contain `.` cannot be expressed this way; build
    /// the path from segments instead.
    pub fn parse_dotted(text: &str) -> Self {
        Self(
            text.split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path without its last segment
    pub fn parent(&self) -> Option<KeyPath> {
        self.0
            .split_last()
            .map(|(_, parent)| KeyPath(parent.to_vec()))
    }

    /// A new path with `key` appended
    pub fn child(&self, key: impl Into<String>) -> KeyPath {
        let mut segments = self.0.clone();
        segments.push(key.into());
        KeyPath(segments)
    }

    pub fn push(&mut self, key: impl Into<String>) {
        self.0.push(key.into());
    }

    /// True if `self` is `other` or one of its ancestors.
    pub fn is_prefix_of(&self, other: &KeyPath) -> bool {
        other.0.starts_with(&self.0)
    }

    /// True if `self` is an ancestor of `other` and not `other` itself.
    pub fn is_strict_prefix_of(&self, other: &KeyPath) -> bool {
        self.len() < other.len() && self.is_prefix_of(other)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        Self(vec![key.to_string()])
    }
}

impl From<String> for KeyPath {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl From<&String> for KeyPath {
    fn from(key: &String) -> Self {
        Self(vec![key.clone()])
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[String]> for KeyPath {
    fn from(segments: &[String]) -> Self {
        Self(segments.to_vec())
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

impl FromIterator<String> for KeyPath {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Get a value at the given path below a root mapping.
///
/// Returns `None` if any segment is missing or an intermediate value is not
/// a mapping. An empty path addresses nothing.
pub fn get_at_path<'a>(root: &'a Map<String, Value>, segments: &[String]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = root.get(first)?;
    for segment in rest {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Get the mapping at the given path, if the path addresses one.
///
/// The empty path addresses the root itself.
pub fn mapping_at_path<'a>(
    root: &'a Map<String, Value>,
    segments: &[String],
) -> Option<&'a Map<String, Value>> {
    if segments.is_empty() {
        return Some(root);
    }
    get_at_path(root, segments)?.as_object()
}
