//! Command handlers.
//!
//! Each handler reads its input files, runs one `schemacfg` operation and
//! hands the resulting text to [`AppContext::emit`].

use std::path::Path;

use anyhow::{Result, bail};
use clap::ValueEnum;
use colored::Colorize;
use schemacfg::{
    AppData, SchemaFormat, Selection,
    data::app_data::{read_config, read_schema},
    dump_schema,
    format::schema_format_json,
    generate_config_store, generate_documentation, generate_schema,
    validate::{Report, Severity},
};

use crate::ctx::AppContext;

/// Schema file format selector for `init`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Yaml,
    Json,
    Toml,
}

impl From<FormatArg> for SchemaFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Yaml => SchemaFormat::Yaml,
            FormatArg::Json => SchemaFormat::Json,
            FormatArg::Toml => SchemaFormat::Toml,
        }
    }
}

/// Handler for the `confirm` subcommands.
pub struct CommandHandler;

impl CommandHandler {
    /// Writes a config file for `schema`.
    ///
    /// Only required options are written unless `all` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or the output written.
    pub fn handle_generate(ctx: &AppContext, schema: &Path, all: bool) -> Result<()> {
        let schema = read_schema(schema)?;
        let store = generate_config_store(&schema, Selection::from_include_all(all));
        ctx.emit(&store.to_ini_string())
    }

    /// Carries the values of `config` into `schema` and writes the resulting
    /// config file.
    ///
    /// Without `all`, optional options are kept only when the old config set
    /// them. With `schema_out`, the migrated schema is written there too.
    ///
    /// # Errors
    ///
    /// Returns an error if either input cannot be read or an output written.
    pub fn handle_migrate(
        ctx: &AppContext,
        schema: &Path,
        config: &Path,
        all: bool,
        schema_out: Option<&Path>,
    ) -> Result<()> {
        let app = AppData::new(config, Some(schema))?;
        info!(
            "migrating {} with {}",
            app.config_path.display(),
            app.schema_path.display()
        );

        for key in schemacfg::unknown_options(&app.schema, &app.config) {
            warn!("{key} is not in the schema and will be dropped");
        }

        let migrated = app.migrated();

        if let Some(path) = schema_out {
            let format = SchemaFormat::from_path(path)?;
            ctx.emit_to(path, &dump_schema(&migrated, format)?)?;
        }

        let selection = if all {
            Selection::All
        } else {
            Selection::RequiredOrSet
        };
        let store = generate_config_store(&migrated, selection);
        ctx.emit(&store.to_ini_string())
    }

    /// Writes the documentation of `schema`.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or the output written.
    pub fn handle_document(ctx: &AppContext, schema: &Path) -> Result<()> {
        let schema = read_schema(schema)?;
        ctx.emit(&generate_documentation(&schema))
    }

    /// Bootstraps a schema from an existing config file.
    ///
    /// The format comes from `format`, else from the output extension, else
    /// YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be read or the schema written.
    pub fn handle_init(ctx: &AppContext, config: &Path, format: Option<FormatArg>) -> Result<()> {
        let config = read_config(config)?;
        let format = match format {
            Some(f) => f.into(),
            None => ctx.output_format()?,
        };
        let schema = generate_schema(&config);
        debug!("bootstrapped {} sections as {format}", schema.sections().count());
        ctx.emit(&dump_schema(&schema, format)?)
    }

    /// Checks `config` against `schema` and prints the findings.
    ///
    /// # Errors
    ///
    /// Fails when the config has errors, so the process exits non-zero.
    pub fn handle_validate(schema: &Path, config: &Path) -> Result<()> {
        let schema = read_schema(schema)?;
        let config_data = read_config(config)?;
        let report = schemacfg::validate(&schema, &config_data);

        print_report(&report);

        let errors = report.errors().count();
        if errors > 0 {
            bail!("{} has {errors} error(s)", config.display());
        }
        println!("{}", format!("{} is valid", config.display()).green());
        Ok(())
    }

    /// Prints the JSON Schema of the schema file format.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn handle_schema_format(ctx: &AppContext) -> Result<()> {
        let mut json = schema_format_json()?;
        json.push('\n');
        ctx.emit(&json)
    }
}

fn print_report(report: &Report) {
    for issue in &report.issues {
        match issue.severity {
            Severity::Error => println!("{} {issue}", "error:".red().bold()),
            Severity::Warning => println!("{} {issue}", "warning:".yellow().bold()),
        }
    }
}
