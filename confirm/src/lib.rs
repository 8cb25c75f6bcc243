//! # confirm
//!
//! Command line front end of [`schemacfg`].
//!
//! `confirm` turns a schema file into a ready-to-fill INI config, migrates
//! old configs to a new schema, renders documentation and checks configs.
//!
//! ## Modules
//!
//! - [`commands`] - one handler per subcommand
//! - [`ctx`] - output destination shared by the handlers
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use confirm::{commands::CommandHandler, ctx::AppContext};
//!
//! let ctx = AppContext::default();
//! CommandHandler::handle_document(&ctx, Path::new("app-schema.yaml")).unwrap();
//! ```

/// Subcommand handlers.
pub mod commands;

/// Command output context.
pub mod ctx;

#[macro_use]
extern crate log;
