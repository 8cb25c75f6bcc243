//! Config file generation from a schema, and schema bootstrap from a config.

use crate::data::{Config, OptionSpec, Schema, option::DEFAULT_DESCRIPTION};
use crate::error::Result;
use crate::format::{SchemaFormat, dump_schema};
use crate::store::{ConfigStore, OptionStore, parse_config};

/// Value written for options that have neither a value nor a default.
pub const PLACEHOLDER: &str = "TO FILL";

/// Comment entry placed before required options.
pub const REQUIRED_MARKER: &str = "# required";

/// Comment entry placed before deprecated options.
pub const DEPRECATED_MARKER: &str = "# deprecated";

/// Which options of a schema end up in a generated config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Required options only.
    #[default]
    Required,
    /// Required options and options carrying a `value`.
    RequiredOrSet,
    /// Every option.
    All,
}

impl Selection {
    /// Selection matching the `include_all` flag.
    pub fn from_include_all(include_all: bool) -> Self {
        if include_all {
            Selection::All
        } else {
            Selection::Required
        }
    }

    /// Whether `spec` is written out under this selection.
    pub fn includes(self, spec: &OptionSpec) -> bool {
        match self {
            Selection::Required => spec.required,
            Selection::RequiredOrSet => spec.required || spec.value.is_some(),
            Selection::All => true,
        }
    }
}

/// Effective string value of an option: value, then default, then placeholder.
pub fn materialized_value(spec: &OptionSpec) -> String {
    spec.resolved()
        .map(ToString::to_string)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Write the selected options of `schema` into `store`.
///
/// Each option is preceded by comment entries: `# required`, `# deprecated`
/// and one `# <line>` per description line when they apply. A section is only created once one
/// of its options is selected.
///
/// # Errors
///
/// Only errors raised by `store` itself.
pub fn materialize_into<S: OptionStore>(
    schema: &Schema,
    selection: Selection,
    store: &mut S,
) -> Result<()> {
    for (section, option, spec) in schema.options() {
        if !selection.includes(spec) {
            trace!("skipping {section}.{option}");
            continue;
        }
        if !store.has_section(section) {
            store.add_section(section);
        }

        if spec.required {
            store.set(section, REQUIRED_MARKER, None)?;
        }
        if spec.deprecated {
            store.set(section, DEPRECATED_MARKER, None)?;
        }
        if let Some(description) = &spec.description {
            for line in description.lines() {
                store.set(section, format!("# {line}").trim_end(), None)?;
            }
        }
        store.set(section, option, Some(&materialized_value(spec)))?;
    }
    Ok(())
}

/// Build a config store holding the required options of `schema`, or every
/// option when `include_all` is set.
pub fn generate_config_parser(schema: &Schema, include_all: bool) -> ConfigStore {
    generate_config_store(schema, Selection::from_include_all(include_all))
}

/// Build a config store holding the options picked by `selection`.
pub fn generate_config_store(schema: &Schema, selection: Selection) -> ConfigStore {
    let mut store = ConfigStore::new();
    let Ok(()) = materialize_into(schema, selection, &mut store) else {
        unreachable!("sections are added before their options are set");
    };
    store
}

/// Schema declaring every option of `config` with the stock description.
pub fn generate_schema(config: &Config) -> Schema {
    let mut schema = Schema::new();
    for (section, options) in config.sections() {
        schema.add_section(section);
        for option in options.keys() {
            schema.insert(section, option.as_str(), OptionSpec::described(DEFAULT_DESCRIPTION));
        }
    }
    schema
}

/// Bootstrap YAML schema text from INI config text.
///
/// # Errors
///
/// [`Error::Parse`](crate::Error::Parse) when the config text is not valid INI.
pub fn generate_schema_file(config_text: &str) -> Result<String> {
    let config = parse_config(config_text)?;
    dump_schema(&generate_schema(&config), SchemaFormat::Yaml)
}
