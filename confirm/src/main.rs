use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use confirm::{
    commands::{CommandHandler, FormatArg},
    ctx::AppContext,
};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "confirm")]
#[command(about = "Generate, migrate, check and document INI configs from a schema", version)]
struct Cli {
    /// Print debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a config file from a schema
    Generate {
        /// Schema file (.yaml, .json or .toml)
        schema: PathBuf,

        /// Include optional options too
        #[arg(long)]
        all: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Carry the values of an existing config into a new schema
    Migrate {
        /// Schema file (.yaml, .json or .toml)
        schema: PathBuf,

        /// Existing config file
        config: PathBuf,

        /// Include optional options that have no value too
        #[arg(long)]
        all: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the migrated schema to this file
        #[arg(long)]
        schema_out: Option<PathBuf>,
    },

    /// Render documentation for a schema
    Document {
        /// Schema file (.yaml, .json or .toml)
        schema: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Bootstrap a schema from an existing config file
    Init {
        /// Existing config file
        config: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Schema format (default: from the output extension, else yaml)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Check a config file against a schema
    Validate {
        /// Schema file (.yaml, .json or .toml)
        schema: PathBuf,

        /// Config file to check
        config: PathBuf,
    },

    /// Print the JSON Schema of the schema file format
    SchemaFormat {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Generate {
            schema,
            all,
            output,
        } => {
            let ctx = AppContext::new(output, true);
            CommandHandler::handle_generate(&ctx, &schema, all)?;
        }
        Commands::Migrate {
            schema,
            config,
            all,
            output,
            schema_out,
        } => {
            let ctx = AppContext::new(output, true);
            CommandHandler::handle_migrate(&ctx, &schema, &config, all, schema_out.as_deref())?;
        }
        Commands::Document { schema, output } => {
            let ctx = AppContext::new(output, true);
            CommandHandler::handle_document(&ctx, &schema)?;
        }
        Commands::Init {
            config,
            output,
            format,
        } => {
            let ctx = AppContext::new(output, true);
            CommandHandler::handle_init(&ctx, &config, format)?;
        }
        Commands::Validate { schema, config } => {
            CommandHandler::handle_validate(&schema, &config)?;
        }
        Commands::SchemaFormat { output } => {
            let ctx = AppContext::new(output, true);
            CommandHandler::handle_schema_format(&ctx)?;
        }
    }
    Ok(())
}
