use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::value_kind;

/// Description given to options of a schema bootstrapped from a config file.
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";

/// Scalar attribute value (`default` or `value`) of an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// String value, the form every INI value takes.
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            // `{:?}` keeps the `.0` of whole floats.
            Scalar::Float(v) => write!(f, "{v:?}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Metadata for one configuration option.
///
/// Every attribute is optional in schema text. Unset flags are `false`, unset
/// values are `None`, and unset attributes are left out again when the schema
/// is written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OptionSpec {
    /// The option must be present in a config file.
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    /// Value used when the config does not set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Scalar>,
    /// Value carried over from an existing config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
    /// Free text shown in generated files and documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type hint, for documentation only.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    /// The option is on its way out.
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
}

impl OptionSpec {
    /// Spec with only a description set, as produced when bootstrapping.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Effective value: `value`, then `default`.
    pub fn resolved(&self) -> Option<&Scalar> {
        self.value.as_ref().or(self.default.as_ref())
    }

    /// Build a spec from one option node of a schema tree.
    ///
    /// `null` stands for an option with no attributes.
    pub(crate) fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => {
                serde_json::from_value(value.clone()).map_err(|e| format!("bad attribute: {e}"))
            }
            other => Err(format!(
                "expected a mapping of attributes, found {}",
                value_kind(other)
            )),
        }
    }
}
