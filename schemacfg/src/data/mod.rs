//! Schema and config data structures.
//!
//! Both structures are two-level ordered mappings keyed by section name and
//! option name:
//!
//! - [`schema`] - section → option → [`OptionSpec`] metadata
//! - [`config`] - section → option → string value, as read from INI text
//! - [`option`] - the per-option metadata record and its scalar values
//! - [`app_data`] - a schema and its config loaded from files
//!
//! Trees coming from YAML, JSON or TOML are first parsed into a
//! [`serde_json::Value`] and then converted with `TryFrom<&Value>`, which is
//! where shape errors are reported.

/// Loading schema and config files from disk.
pub mod app_data;

/// Config values keyed by section and option.
pub mod config;

/// Option metadata and scalar values.
pub mod option;

/// Schema structure and shape checks.
pub mod schema;

pub use app_data::AppData;
pub use config::Config;
pub use option::{OptionSpec, Scalar};
pub use schema::{Schema, Section};

use serde_json::Value;

/// Short name of a JSON value kind, used in shape error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
