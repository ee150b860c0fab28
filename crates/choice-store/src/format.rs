//! On-disk document formats
//!
//! Every format is normalized into a `serde_json::Value` object whose key
//! order follows the source file.

use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;
use std::path::Path;

use crate::{Error, Result};

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreFormat {
    Yaml,
    Json,
    Toml,
}

impl StoreFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Detect format from a file path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }

    /// Human-readable name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }

    /// Parse document text into a mapping.
    ///
    /// Blank input is the empty mapping. A document whose root is not a
    /// mapping is rejected with [`Error::InvalidRoot`].
    pub fn parse(&self, content: &str, path: &Path) -> Result<Map<String, Value>> {
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let parse_err = |message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        };

        let value = match self {
            Self::Yaml => {
                let yaml: YamlValue =
                    serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
                yaml_to_json(&yaml).map_err(&parse_err)?
            }
            Self::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            Self::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        };

        match value {
            Value::Null => Ok(Map::new()),
            Value::Object(map) => Ok(map),
            _ => Err(Error::InvalidRoot {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Render a mapping back to document text
    pub fn render(&self, document: &Map<String, Value>, path: &Path) -> Result<String> {
        let serialize_err = |message: String| Error::ConfigSerialize {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        };

        match self {
            Self::Yaml => {
                serde_yaml::to_string(document).map_err(|e| serialize_err(e.to_string()))
            }
            Self::Json => serde_json::to_string_pretty(document)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| serialize_err(e.to_string())),
            Self::Toml => {
                let mut table = toml::map::Map::new();
                for (k, v) in document {
                    table.insert(k.clone(), json_to_toml(v).map_err(&serialize_err)?);
                }
                let toml_value = toml::Value::Table(table);
                toml::to_string_pretty(&toml_value).map_err(|e| serialize_err(e.to_string()))
            }
        }
    }
}

/// Convert a YAML value into JSON, keeping mapping order.
///
/// Scalar keys (`1:`, `true:`) become their string form. Values JSON cannot
/// carry (non-finite floats, tagged nodes) are rejected rather than
/// rewritten, since the next save would otherwise change them on disk.
fn yaml_to_json(value: &YamlValue) -> std::result::Result<Value, String> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("unsupported number {n}"))?
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => Value::Array(
            items
                .iter()
                .map(yaml_to_json)
                .collect::<std::result::Result<_, _>>()?,
        ),
        YamlValue::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = yaml_key(k).ok_or_else(|| format!("unsupported mapping key {k:?}"))?;
                json_map.insert(key, yaml_to_json(v)?);
            }
            Value::Object(json_map)
        }
        YamlValue::Tagged(tagged) => {
            return Err(format!("unsupported tag {}", tagged.tag));
        }
    })
}

fn yaml_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert a serde_json::Value to a toml::Value
fn json_to_toml(json: &Value) -> std::result::Result<toml::Value, String> {
    match json {
        Value::Null => Err("TOML does not support null values".into()),
        Value::Bool(b) => Ok(toml::Value::Boolean(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(toml::Value::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(toml::Value::Float(f))
            } else {
                Err("Invalid number".into())
            }
        }
        Value::String(s) => Ok(toml::Value::String(s.clone())),
        Value::Array(arr) => {
            let items: std::result::Result<Vec<_>, _> = arr.iter().map(json_to_toml).collect();
            Ok(toml::Value::Array(items?))
        }
        Value::Object(obj) => {
            let mut table = toml::map::Map::new();
            for (k, v) in obj {
                table.insert(k.clone(), json_to_toml(v)?);
            }
            Ok(toml::Value::Table(table))
        }
    }
}
