use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::data::value_kind;
use crate::error::{Error, Result};

/// Config values: section → option → string value.
///
/// Setting an option twice keeps the last value, as INI readers do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Config {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl Config {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &IndexMap<String, String>)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn section(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(name)
    }

    /// Value of `option` in `section`, if set.
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .get(option)
            .map(String::as_str)
    }

    /// Add a section without options, keeping an existing one untouched.
    pub fn add_section(&mut self, name: impl Into<String>) {
        self.sections.entry(name.into()).or_default();
    }

    /// Set an option value, creating the section when needed.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(option.into(), value.into());
    }
}

impl TryFrom<&Value> for Config {
    type Error = Error;

    /// Read a config from a parsed tree.
    ///
    /// Scalar leaves are turned into their string form and `null` into an
    /// empty string. A section that is not a mapping, or an option holding a
    /// sequence or mapping, fails with [`Error::MalformedConfig`].
    fn try_from(value: &Value) -> Result<Self> {
        let root = match value {
            Value::Null => return Ok(Config::new()),
            Value::Object(map) => map,
            other => {
                return Err(Error::malformed_config(
                    "<root>",
                    format!("expected a mapping of sections, found {}", value_kind(other)),
                ));
            }
        };

        let mut config = Config::new();
        for (section_name, section) in root {
            let Value::Object(options) = section else {
                return Err(Error::malformed_config(
                    section_name.as_str(),
                    format!("expected a mapping of options, found {}", value_kind(section)),
                ));
            };
            config.add_section(section_name.as_str());
            for (option_name, option) in options {
                let text = match option {
                    Value::Null => String::new(),
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other => {
                        return Err(Error::malformed_config(
                            format!("{section_name}.{option_name}"),
                            format!("expected a scalar value, found {}", value_kind(other)),
                        ));
                    }
                };
                config.set(section_name.as_str(), option_name.as_str(), text);
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_last_write_wins() {
        let mut config = Config::new();
        config.set("section", "option", "first");
        config.set("section", "option", "second");
        assert_eq!(config.get("section", "option"), Some("second"));
        assert_eq!(config.section("section").unwrap().len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut config = Config::new();
        config.set("Section", "Option", "v");
        assert_eq!(config.get("section", "option"), None);
        assert_eq!(config.get("Section", "Option"), Some("v"));
    }

    #[test]
    fn test_try_from_value() {
        let config = Config::try_from(&json!({
            "section": {"port": 8080, "debug": true, "name": "db", "empty": null}
        }))
        .unwrap();
        assert_eq!(config.get("section", "port"), Some("8080"));
        assert_eq!(config.get("section", "debug"), Some("true"));
        assert_eq!(config.get("section", "name"), Some("db"));
        assert_eq!(config.get("section", "empty"), Some(""));
    }

    #[test]
    fn test_malformed_config() {
        let err = Config::try_from(&json!({"section": [1, 2]})).unwrap_err();
        assert!(matches!(err, Error::MalformedConfig { .. }));

        let err = Config::try_from(&json!({"section": {"option": {"nested": 1}}})).unwrap_err();
        assert!(
            matches!(&err, Error::MalformedConfig { section, .. } if section == "section.option")
        );
    }
}
