//! Schema text formats.
//!
//! Schemas are usually written in YAML; JSON and TOML files are accepted as
//! well and picked by file extension. Every format is parsed into a
//! [`serde_json::Value`] tree first, so the shape checks of
//! [`Schema::try_from`] apply to all of them.

use std::{fmt, path::Path, str::FromStr};

use serde_json::Value;

use crate::data::Schema;
use crate::error::{Error, Result};

/// Serialization format of a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaFormat {
    /// YAML (`.yaml`, `.yml`).
    #[default]
    Yaml,
    /// JSON (`.json`).
    Json,
    /// TOML (`.toml`).
    Toml,
}

impl SchemaFormat {
    /// Pick the format from a file extension.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        ext.parse()
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            SchemaFormat::Yaml => "yaml",
            SchemaFormat::Json => "json",
            SchemaFormat::Toml => "toml",
        }
    }

    fn name(self) -> &'static str {
        match self {
            SchemaFormat::Yaml => "YAML",
            SchemaFormat::Json => "JSON",
            SchemaFormat::Toml => "TOML",
        }
    }
}

impl FromStr for SchemaFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(SchemaFormat::Yaml),
            "json" => Ok(SchemaFormat::Json),
            "toml" | "tml" => Ok(SchemaFormat::Toml),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parse schema text into a neutral value tree.
pub fn parse_tree(text: &str, format: SchemaFormat) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    let name = format.name();
    match format {
        SchemaFormat::Yaml => serde_yaml::from_str(text).map_err(|e| Error::parse(name, e)),
        SchemaFormat::Json => serde_json::from_str(text).map_err(|e| Error::parse(name, e)),
        SchemaFormat::Toml => {
            let v: toml::Value = toml::from_str(text).map_err(|e| Error::parse(name, e))?;
            serde_json::to_value(v).map_err(|e| Error::parse(name, e))
        }
    }
}

/// Parse and shape-check schema text.
///
/// # Errors
///
/// [`Error::Parse`] for invalid text and [`Error::MalformedSchema`] for text
/// that is not a section → option → attributes mapping.
pub fn load_schema(text: &str, format: SchemaFormat) -> Result<Schema> {
    let tree = parse_tree(text, format)?;
    let schema = Schema::try_from(&tree)?;
    debug!(
        "loaded {format} schema with {} option(s)",
        schema.options().count()
    );
    Ok(schema)
}

/// Serialize a schema, keeping section and option order.
pub fn dump_schema(schema: &Schema, format: SchemaFormat) -> Result<String> {
    let name = format.name();
    match format {
        SchemaFormat::Yaml => serde_yaml::to_string(schema).map_err(|e| Error::serialize(name, e)),
        SchemaFormat::Json => {
            let mut s =
                serde_json::to_string_pretty(schema).map_err(|e| Error::serialize(name, e))?;
            s.push('\n');
            Ok(s)
        }
        SchemaFormat::Toml => toml::to_string_pretty(schema).map_err(|e| Error::serialize(name, e)),
    }
}

/// JSON Schema describing the schema file format itself.
pub fn schema_format_json() -> Result<String> {
    let schema = schemars::schema_for!(Schema);
    serde_json::to_string_pretty(&schema).map_err(|e| Error::serialize("JSON", e))
}
