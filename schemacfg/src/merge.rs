//! Migration of existing config values into a schema.
//!
//! Migration is schema driven: the result has exactly the sections and
//! options of the schema. Config keys the schema does not declare are left
//! out of the result; [`unknown_options`] lists them.

use std::fmt;

use crate::data::{Config, Scalar, Schema};

/// A config key that the schema does not declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownKey {
    /// A whole section is unknown.
    Section(String),
    /// An option of a known section is unknown.
    Option { section: String, option: String },
}

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownKey::Section(section) => write!(f, "section [{section}]"),
            UnknownKey::Option { section, option } => write!(f, "option {section}.{option}"),
        }
    }
}

/// Copy `schema` and set each option's `value` from `config`.
///
/// An option found in `config` gets its value as a string, replacing any
/// `value` it already had. Options missing from `config` are copied as they
/// are.
pub fn append_existing_values(schema: &Schema, config: &Config) -> Schema {
    let mut migrated = schema.clone();
    let mut carried = 0usize;

    for (section, option, _) in schema.options() {
        if let Some(value) = config.get(section, option)
            && let Some(spec) = migrated.option_mut(section, option)
        {
            spec.value = Some(Scalar::from(value));
            carried += 1;
        }
    }

    for key in unknown_options(schema, config) {
        debug!("dropping unknown {key}");
    }
    debug!("carried {carried} existing value(s) into the schema");
    migrated
}

/// Sections and options set in `config` that `schema` does not declare.
pub fn unknown_options(schema: &Schema, config: &Config) -> Vec<UnknownKey> {
    let mut unknown = Vec::new();
    for (section, options) in config.sections() {
        let Some(declared) = schema.section(section) else {
            unknown.push(UnknownKey::Section(section.to_string()));
            continue;
        };
        for option in options.keys() {
            if !declared.contains_key(option) {
                unknown.push(UnknownKey::Option {
                    section: section.to_string(),
                    option: option.clone(),
                });
            }
        }
    }
    unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OptionSpec;

    fn required() -> OptionSpec {
        OptionSpec {
            required: true,
            ..Default::default()
        }
    }

    fn three_required() -> Schema {
        let mut schema = Schema::new();
        schema.insert("section", "option1", required());
        schema.insert("section", "option2", required());
        schema.insert("section", "option3", required());
        schema
    }

    #[test]
    fn test_append() {
        let mut config = Config::new();
        config.set("section", "option1", "value1");
        config.set("section", "option2", "value2");

        let migrated = append_existing_values(&three_required(), &config);

        let option3 = migrated.option("section", "option3").unwrap();
        assert!(option3.required);
        assert_eq!(option3.value, None);

        assert_eq!(
            migrated.option("section", "option1").unwrap().value,
            Some(Scalar::from("value1"))
        );
        assert_eq!(
            migrated.option("section", "option2").unwrap().value,
            Some(Scalar::from("value2"))
        );
    }

    #[test]
    fn test_empty_config_changes_nothing() {
        let schema = three_required();
        assert_eq!(append_existing_values(&schema, &Config::new()), schema);
    }

    #[test]
    fn test_existing_value_is_replaced() {
        let mut schema = Schema::new();
        schema.insert(
            "section",
            "option",
            OptionSpec {
                value: Some(Scalar::Integer(1)),
                default: Some(Scalar::Integer(2)),
                ..Default::default()
            },
        );
        let mut config = Config::new();
        config.set("section", "option", "3");

        let migrated = append_existing_values(&schema, &config);
        let spec = migrated.option("section", "option").unwrap();
        assert_eq!(spec.value, Some(Scalar::from("3")));
        assert_eq!(spec.default, Some(Scalar::Integer(2)));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let mut config = Config::new();
        config.set("section", "option1", "value1");
        config.set("section", "extra", "x");
        config.set("other", "key", "y");

        let migrated = append_existing_values(&three_required(), &config);
        assert!(migrated.option("section", "extra").is_none());
        assert!(migrated.section("other").is_none());
        assert_eq!(migrated.section("section").unwrap().len(), 3);

        assert_eq!(
            unknown_options(&three_required(), &config),
            [
                UnknownKey::Option {
                    section: "section".into(),
                    option: "extra".into()
                },
                UnknownKey::Section("other".into()),
            ]
        );
    }

    #[test]
    fn test_input_schema_untouched() {
        let schema = three_required();
        let mut config = Config::new();
        config.set("section", "option1", "value1");
        let _ = append_existing_values(&schema, &config);
        assert_eq!(schema.option("section", "option1").unwrap().value, None);
    }
}
