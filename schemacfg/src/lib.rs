//! # schemacfg
//!
//! Schema driven scaffolding for INI configuration files.
//!
//! A schema lists the sections and options a config file is expected to have,
//! with per-option metadata: whether it is required, its default, a type hint,
//! a description and whether it is deprecated. From a schema, schemacfg can:
//!
//! - generate a ready-to-fill config file ([`generate_config_parser`])
//! - carry the values of an existing config into the schema
//!   ([`append_existing_values`])
//! - render plain-text documentation ([`generate_documentation`])
//! - bootstrap a schema from a hand-written config ([`generate_schema_file`])
//! - check a config against the schema ([`validate`](validate::validate))
//!
//! ## Quick Start
//!
//! ```rust
//! use schemacfg::{OptionStore, SchemaFormat, generate_config_parser, load_schema};
//!
//! let schema = load_schema(
//!     "server:\n  host:\n    required: true\n  port:\n    default: 8080\n",
//!     SchemaFormat::Yaml,
//! )
//! .unwrap();
//!
//! let store = generate_config_parser(&schema, false);
//! assert_eq!(store.get("server", "host").unwrap(), Some("TO FILL"));
//! assert!(store.get("server", "port").is_err());
//!
//! print!("{store}");
//! ```
//!
//! ## Modules
//!
//! - [`data`] - schema and config data structures, file loading
//! - [`merge`] - migration of config values into a schema
//! - [`generate`] - config generation and schema bootstrap
//! - [`docs`] - documentation rendering
//! - [`validate`] - config checks
//! - [`store`] - the option store interface and its INI implementation
//! - [`format`] - schema text formats

#[macro_use]
extern crate log;

/// Schema and config data structures.
pub mod data;

/// Documentation rendering.
pub mod docs;

/// Error types and result definitions.
pub mod error;

/// Schema text formats (YAML, JSON, TOML).
pub mod format;

/// Config generation from a schema, and the reverse bootstrap.
pub mod generate;

/// Migration of existing config values into a schema.
pub mod merge;

/// Option store interface and INI implementation.
pub mod store;

/// Presence checks of a config against a schema.
pub mod validate;

pub use data::{AppData, Config, OptionSpec, Scalar, Schema};
pub use docs::generate_documentation;
pub use error::{Error, Result};
pub use format::{SchemaFormat, dump_schema, load_schema};
pub use generate::{
    Selection, generate_config_parser, generate_config_store, generate_schema,
    generate_schema_file, materialize_into,
};
pub use merge::{UnknownKey, append_existing_values, unknown_options};
pub use store::{ConfigStore, OptionStore, parse_config};
pub use validate::{Report, Severity, validate};
