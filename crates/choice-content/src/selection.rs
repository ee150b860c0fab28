//! Selection chain resolution
//!
//! Starting at a choice group, follow `selection` to the chosen option. A
//! terminal option ends the chain. A nested option contributes its own
//! `value` and becomes the next group to follow.

use choice_store::{Document, DocumentStore};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::path::{KeyPath, get_at_path, mapping_at_path};

/// Key naming the chosen option inside a choice group
pub const SELECTION_KEY: &str = "selection";

/// Key holding a nested option's own value
pub const VALUE_KEY: &str = "value";

/// True for keys that carry group metadata rather than options.
///
/// `selection` is reserved in every group. `value` is reserved only inside a
/// nested option, where it holds the option's own value.
pub fn is_reserved_key(key: &str, nested: bool) -> bool {
    key == SELECTION_KEY || (nested && key == VALUE_KEY)
}

/// True if the mapping at `path` is an option of an enclosing choice group
pub(crate) fn is_nested_option(root: &Document, path: &KeyPath) -> bool {
    match path.parent() {
        Some(parent) if !parent.is_empty() => mapping_at_path(root, parent.segments())
            .is_some_and(|group| group.contains_key(SELECTION_KEY)),
        _ => false,
    }
}

/// Resolves and updates selections in a [`ConfigDocument`].
#[derive(Debug)]
pub struct SelectionResolver<'a, S> {
    document: &'a ConfigDocument<S>,
}

impl<'a, S: DocumentStore> SelectionResolver<'a, S> {
    pub fn new(document: &'a ConfigDocument<S>) -> Self {
        Self { document }
    }

    /// Resolve the selection chain starting at the group at `start`.
    ///
    /// Returns the chosen values outermost first. The document is loaded
    /// once and never saved.
    ///
    /// # Errors
    ///
    /// Returns `MalformedSelectionChain` if any group on the way is missing,
    /// lacks a `selection`, or selects an option that does not exist. No
    /// partial chain is returned.
    pub fn resolve(&self, start: impl Into<KeyPath>) -> Result<Vec<Value>> {
        let document = self.document.load()?;
        resolve_chain(&document, &start.into())
    }

    /// Choose `option` in the group at `group`.
    ///
    /// Unlike a raw write to `group.selection`, this checks that `option` is
    /// one of the group's options first, so the group never ends up
    /// selecting a sibling that does not exist.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `group` does not address a mapping and
    /// `UnknownOption` if `option` is not one of its option keys.
    pub fn select(&self, group: impl Into<KeyPath>, option: &str) -> Result<()> {
        let group = group.into();
        if group.is_empty() {
            return Err(Error::invalid_path(group, "group path is empty"));
        }

        let document = self.document.load()?;
        let Some(map) = mapping_at_path(&document, group.segments()) else {
            return Err(Error::invalid_path(group, "not a choice group"));
        };
        let nested = is_nested_option(&document, &group);
        if is_reserved_key(option, nested) || !map.contains_key(option) {
            return Err(Error::UnknownOption {
                group,
                option: option.to_string(),
            });
        }

        tracing::debug!(%group, option, "Selecting option");
        self.document.write(group.child(SELECTION_KEY), option)
    }
}

/// Resolve the selection chain of the group at `start` within `root`.
///
/// # Examples
///
/// ```
/// use choice_content::KeyPath;
/// use choice_content::selection::resolve_chain;
/// use serde_json::json;
///
/// let doc = json!({"mode": {"selection": "slow", "fast": 10,
///     "slow": {"value": 20, "selection": "a", "a": 1, "b": 2}}});
/// let chain = resolve_chain(doc.as_object().unwrap(), &KeyPath::from("mode")).unwrap();
/// assert_eq!(chain, vec![json!(20), json!(1)]);
/// ```
pub fn resolve_chain(root: &Document, start: &KeyPath) -> Result<Vec<Value>> {
    let mut group_path = start.clone();
    let mut cursor = start_group(root, start)?;
    let mut chain = Vec::new();
    let mut nested = is_nested_option(root, start);

    loop {
        let option = selected_option(cursor, &group_path, nested)?;
        let Some(chosen) = cursor.get(option.as_ref()) else {
            return Err(Error::malformed(
                group_path,
                format!("selection '{option}' names no option"),
            ));
        };
        tracing::debug!(group = %group_path, %option, "Following selection");
        group_path.push(option.into_owned());

        match chosen {
            Value::Object(inner) => {
                let Some(own_value) = inner.get(VALUE_KEY) else {
                    return Err(Error::malformed(
                        group_path,
                        format!("nested option has no '{VALUE_KEY}'"),
                    ));
                };
                chain.push(own_value.clone());
                cursor = inner;
                nested = true;
            }
            terminal => {
                chain.push(terminal.clone());
                return Ok(chain);
            }
        }
    }
}

fn start_group<'a>(root: &'a Document, start: &KeyPath) -> Result<&'a Map<String, Value>> {
    match get_at_path(root, start.segments()) {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(Error::malformed(start, "not a choice group")),
        None => Err(Error::malformed(start, "group does not exist")),
    }
}

/// The option named by a group's `selection`.
///
/// Numbers and booleans are accepted in their text form, matching how
/// scalar mapping keys are loaded.
fn selected_option<'a>(
    group: &'a Map<String, Value>,
    path: &KeyPath,
    nested: bool,
) -> Result<Cow<'a, str>> {
    let option = match group.get(SELECTION_KEY) {
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
        Some(_) => {
            return Err(Error::malformed(path, "selection is not a scalar"));
        }
        None => return Err(Error::malformed(path, "missing selection")),
    };
    if is_reserved_key(&option, nested) {
        return Err(Error::malformed(
            path,
            format!("selection '{option}' names a reserved key"),
        ));
    }
    Ok(option)
}
