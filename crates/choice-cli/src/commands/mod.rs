//! Command implementations for choice-cli

pub mod choice;
pub mod value;

pub use choice::{run_resolve, run_select, run_show};
pub use value::{run_get, run_set};

use std::path::Path;

use choice_content::{ConfigDocument, KeyPath};
use choice_store::FileStore;
use serde_json::Value;

use crate::error::{CliError, Result};

/// Open the document at `file`, detecting its format from the extension
pub(crate) fn open_document(file: &Path) -> Result<ConfigDocument<FileStore>> {
    Ok(ConfigDocument::new(FileStore::new(file)?))
}

/// Parse a dotted path argument, rejecting paths with no keys
pub(crate) fn parse_path(text: &str) -> Result<KeyPath> {
    let path = KeyPath::parse_dotted(text);
    if path.is_empty() {
        return Err(CliError::user(format!("'{text}' is not a key path")));
    }
    Ok(path)
}

/// Render a value for plain output: strings bare, everything else as JSON
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
