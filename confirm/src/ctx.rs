//! Command context: where command output goes.
//!
//! Every command produces one text blob. [`AppContext::emit`] writes it to
//! stdout, or to the `--output` file, backing up any file it replaces.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use colored::Colorize;
use schemacfg::{SchemaFormat, data::app_data::write_with_backup};

/// Output configuration shared by all commands.
#[derive(Default, Clone, Debug)]
pub struct AppContext {
    /// File to write to instead of stdout.
    pub output: Option<PathBuf>,
    /// Whether to keep a timestamped copy of an output file before replacing it.
    pub backup: bool,
}

impl AppContext {
    /// Creates a context writing to `output`, or stdout when `None`.
    pub fn new(output: Option<PathBuf>, backup: bool) -> Self {
        Self { output, backup }
    }

    /// Writes command output to its destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the output file or stdout cannot be written.
    pub fn emit(&self, content: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => Self::write_file(path, content, self.backup),
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
        }
    }

    /// Writes `content` to a side file such as `--schema-out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn emit_to(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        Self::write_file(path, content, self.backup)
    }

    /// Format of the output file, taken from its extension, or YAML for stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the output extension is not a schema format.
    pub fn output_format(&self) -> anyhow::Result<SchemaFormat> {
        match &self.output {
            Some(path) => SchemaFormat::from_path(path)
                .with_context(|| format!("Cannot pick a schema format for {}", path.display())),
            None => Ok(SchemaFormat::Yaml),
        }
    }

    fn write_file(path: &Path, content: &str, backup: bool) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        if backup {
            if let Some(bk) = write_with_backup(path, content)? {
                println!(
                    "{}",
                    format!("Previous file kept as {}", bk.display()).yellow()
                );
            }
        } else {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        info!("wrote {}", path.display());
        Ok(())
    }
}
