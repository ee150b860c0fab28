//! Choice tree shape queries
//!
//! Describes which options a group offers and whether each option is a plain
//! value or carries sub-choices. Front ends build their choice widgets from
//! this without touching the raw document.

use choice_store::{Document, DocumentStore};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::path::{KeyPath, get_at_path};
use crate::selection::{SELECTION_KEY, VALUE_KEY, is_nested_option, is_reserved_key};

/// A choice group and its options, in document order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceGroup {
    pub key: KeyPath,
    pub selection: Option<String>,
    pub options: Vec<ChoiceOption>,
}

impl ChoiceGroup {
    pub fn option(&self, key: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.key == key)
    }

    pub fn option_keys(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.key.as_str())
    }
}

/// One option of a choice group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub key: String,
    #[serde(flatten)]
    pub kind: OptionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionKind {
    /// The option is a concrete value
    Terminal { value: Value },
    /// The option carries its own value and a nested group of sub-choices
    Nested {
        value: Option<Value>,
        selection: Option<String>,
        options: Vec<String>,
    },
}

impl OptionKind {
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested { .. })
    }
}

/// Describe the group at `group`.
///
/// # Errors
///
/// Returns `MalformedSelectionChain` if `group` is missing or not a mapping.
pub fn choice_group(root: &Document, group: &KeyPath) -> Result<ChoiceGroup> {
    match get_at_path(root, group.segments()) {
        Some(Value::Object(map)) => {
            let nested = is_nested_option(root, group);
            Ok(describe(group.clone(), map, nested))
        }
        Some(_) => Err(Error::malformed(group, "not a choice group")),
        None => Err(Error::malformed(group, "group does not exist")),
    }
}

/// Describe every top-level mapping in the document as a choice group
pub fn choice_groups(root: &Document) -> Vec<ChoiceGroup> {
    root.iter()
        .filter_map(|(key, value)| {
            value
                .as_object()
                .map(|map| describe(KeyPath::from(key), map, false))
        })
        .collect()
}

/// `nested` marks a group that is itself an option, whose `value` is its own.
fn describe(key: KeyPath, map: &Map<String, Value>, nested: bool) -> ChoiceGroup {
    let options = map
        .iter()
        .filter(|(k, _)| !is_reserved_key(k, nested))
        .map(|(k, v)| ChoiceOption {
            key: k.clone(),
            kind: match v {
                Value::Object(inner) => OptionKind::Nested {
                    value: inner.get(VALUE_KEY).cloned(),
                    selection: selection_text(inner),
                    options: inner
                        .keys()
                        .filter(|k| !is_reserved_key(k, true))
                        .cloned()
                        .collect(),
                },
                terminal => OptionKind::Terminal {
                    value: terminal.clone(),
                },
            },
        })
        .collect();

    ChoiceGroup {
        key,
        selection: selection_text(map),
        options,
    }
}

fn selection_text(map: &Map<String, Value>) -> Option<String> {
    match map.get(SELECTION_KEY)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl<S: DocumentStore> ConfigDocument<S> {
    /// Describe the choice group at `group`
    pub fn choice_group(&self, group: impl Into<KeyPath>) -> Result<ChoiceGroup> {
        let document = self.load()?;
        choice_group(&document, &group.into())
    }

    /// Describe every top-level choice group
    pub fn choice_groups(&self) -> Result<Vec<ChoiceGroup>> {
        let document = self.load()?;
        Ok(choice_groups(&document))
    }
}
