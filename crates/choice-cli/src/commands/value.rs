//! Get and set commands

use std::path::Path;

use colored::Colorize;
use serde_json::Value;

use super::{open_document, parse_path, render_value};
use crate::error::Result;

/// Print the value at `path`, or a note on stderr when there is none
pub fn run_get(file: &Path, path: &str, json: bool) -> Result<()> {
    let document = open_document(file)?;
    let key_path = parse_path(path)?;

    match document.read(key_path)? {
        Some(value) if json => println!("{}", serde_json::to_string_pretty(&value)?),
        Some(value) => println!("{}", render_value(&value)),
        None => eprintln!("{}", "(no value)".dimmed()),
    }
    Ok(())
}

/// Store `raw` at `path`
pub fn run_set(file: &Path, path: &str, raw: &str) -> Result<()> {
    let document = open_document(file)?;
    let key_path = parse_path(path)?;
    let value = parse_value(raw);

    document.write(key_path.clone(), value.clone())?;
    println!(
        "{} {} = {}",
        "Set".green().bold(),
        key_path.to_string().cyan(),
        render_value(&value)
    );
    Ok(())
}

/// Read a command-line value as a YAML scalar or sequence.
///
/// Anything else, mappings included, is kept as the literal string, so
/// `set` never replaces a value with a subtree.
fn parse_value(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::String(raw.to_string());
    }
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Object(_)) | Err(_) => Value::String(raw.to_string()),
        Ok(value) => value,
    }
}
