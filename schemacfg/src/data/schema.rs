use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use crate::data::{OptionSpec, value_kind};
use crate::error::{Error, Result};

/// Options of one section, in declaration order.
pub type Section = IndexMap<String, OptionSpec>;

/// Expected configuration structure: section → option → [`OptionSpec`].
///
/// Sections and options keep the order in which they were declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Schema {
    sections: IndexMap<String, Section>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the schema declares no section at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over sections in declaration order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over every `(section, option, spec)` triple.
    pub fn options(&self) -> impl Iterator<Item = (&str, &str, &OptionSpec)> {
        self.sections.iter().flat_map(|(section, options)| {
            options
                .iter()
                .map(move |(option, spec)| (section.as_str(), option.as_str(), spec))
        })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn option(&self, section: &str, option: &str) -> Option<&OptionSpec> {
        self.sections.get(section)?.get(option)
    }

    pub fn option_mut(&mut self, section: &str, option: &str) -> Option<&mut OptionSpec> {
        self.sections.get_mut(section)?.get_mut(option)
    }

    /// Declare a section without options, keeping an existing one untouched.
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Section {
        self.sections.entry(name.into()).or_default()
    }

    /// Declare or replace an option, creating its section when needed.
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        option: impl Into<String>,
        spec: OptionSpec,
    ) -> Option<OptionSpec> {
        self.add_section(section).insert(option.into(), spec)
    }
}

impl TryFrom<&Value> for Schema {
    type Error = Error;

    /// Check the two-level shape of a parsed schema tree.
    ///
    /// A `null` root (empty document) is an empty schema and a `null` section
    /// is a section without options. Any other non-mapping node fails with
    /// [`Error::MalformedSchema`].
    fn try_from(value: &Value) -> Result<Self> {
        let root = match value {
            Value::Null => return Ok(Schema::new()),
            Value::Object(map) => map,
            other => {
                return Err(Error::malformed_schema(
                    "<root>",
                    format!("expected a mapping of sections, found {}", value_kind(other)),
                ));
            }
        };

        let mut schema = Schema::new();
        for (section_name, section) in root {
            let options = match section {
                Value::Null => {
                    schema.add_section(section_name.as_str());
                    continue;
                }
                Value::Object(options) => options,
                other => {
                    return Err(Error::malformed_schema(
                        section_name.as_str(),
                        format!("expected a mapping of options, found {}", value_kind(other)),
                    ));
                }
            };

            let entry = schema.add_section(section_name.as_str());
            for (option_name, attributes) in options {
                let spec = OptionSpec::from_value(attributes).map_err(|detail| {
                    Error::malformed_schema(format!("{section_name}.{option_name}"), detail)
                })?;
                entry.insert(option_name.clone(), spec);
            }
        }
        Ok(schema)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a String, &'a Section);
    type IntoIter = indexmap::map::Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Scalar;
    use serde_json::json;

    #[test]
    fn test_shape_and_order() {
        let schema = Schema::try_from(&json!({
            "b_section": {
                "zeta": {"required": true},
                "alpha": {"default": "DB"}
            },
            "a_section": {
                "option": null
            }
        }))
        .unwrap();

        let sections: Vec<_> = schema.sections().map(|(name, _)| name).collect();
        assert_eq!(sections, ["b_section", "a_section"]);

        let options: Vec<_> = schema.options().map(|(_, o, _)| o).collect();
        assert_eq!(options, ["zeta", "alpha", "option"]);

        assert!(schema.option("b_section", "zeta").unwrap().required);
        assert_eq!(
            schema.option("b_section", "alpha").unwrap().default,
            Some(Scalar::from("DB"))
        );
        assert_eq!(
            schema.option("a_section", "option"),
            Some(&OptionSpec::default())
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(Schema::try_from(&Value::Null).unwrap().is_empty());
        assert!(Schema::try_from(&json!({})).unwrap().is_empty());

        let schema = Schema::try_from(&json!({"section": null})).unwrap();
        assert!(schema.section("section").unwrap().is_empty());
    }

    #[test]
    fn test_section_must_be_mapping() {
        let err = Schema::try_from(&json!({"section": "value"})).unwrap_err();
        assert!(
            matches!(&err, Error::MalformedSchema { section, .. } if section == "section"),
            "{err}"
        );

        let err = Schema::try_from(&json!(["section"])).unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { .. }));
    }

    #[test]
    fn test_option_must_be_mapping() {
        let err = Schema::try_from(&json!({"section": {"option": 3}})).unwrap_err();
        assert!(
            matches!(&err, Error::MalformedSchema { section, .. } if section == "section.option"),
            "{err}"
        );
    }
}
