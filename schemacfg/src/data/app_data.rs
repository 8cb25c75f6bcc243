use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, bail};

use crate::{
    data::{Config, Schema},
    format::{SchemaFormat, load_schema},
    merge::append_existing_values,
    store::parse_config,
};

/// Derive a default schema path from a config path.
///
/// `app.ini` maps to `app-schema.yaml` next to it.
pub fn default_schema_by_init(config: &Path) -> PathBuf {
    let binding = config
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut name_split = binding.split('.').collect::<Vec<_>>();
    if name_split.len() > 1 {
        name_split.pop();
    }

    let name = format!("{}-schema.yaml", name_split.join("."));

    match config.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Read and check a schema file, picking the format from its extension.
pub fn read_schema(path: &Path) -> anyhow::Result<Schema> {
    if !path.exists() {
        bail!("Schema file does not exist: {}", path.display());
    }
    let format = SchemaFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let schema =
        load_schema(&content, format).with_context(|| format!("In {}", path.display()))?;
    Ok(schema)
}

/// Read an INI config file.
pub fn read_config(path: &Path) -> anyhow::Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse_config(&content).with_context(|| format!("In {}", path.display()))?;
    Ok(config)
}

/// Write `content` to `path`, keeping a timestamped backup of any file
/// already there.
///
/// Returns the backup path when one was made.
pub fn write_with_backup(path: &Path, content: &str) -> anyhow::Result<Option<PathBuf>> {
    let mut backup = None;
    if path.exists() {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_secs();
        let bk = if ext.is_empty() {
            format!("bk-{secs}")
        } else {
            format!("bk-{secs}.{ext}")
        };

        let backup_path = path.with_extension(bk);
        fs::copy(path, &backup_path)
            .with_context(|| format!("Failed to back up {}", path.display()))?;
        info!("backed up {} to {}", path.display(), backup_path.display());
        backup = Some(backup_path);
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(backup)
}

/// A schema together with the config it describes, loaded from disk.
#[derive(Debug, Clone)]
pub struct AppData {
    /// Parsed schema.
    pub schema: Schema,
    /// Parsed config; empty when no config file exists yet.
    pub config: Config,
    /// Path the schema was read from.
    pub schema_path: PathBuf,
    /// Path of the config file.
    pub config_path: PathBuf,
}

impl AppData {
    /// Load a config file and its schema.
    ///
    /// When `schema` is not provided it is derived from the config path with
    /// [`default_schema_by_init`]. A missing config file is treated as an
    /// empty config; a missing schema file is an error.
    pub fn new(
        config: impl AsRef<Path>,
        schema: Option<impl AsRef<Path>>,
    ) -> anyhow::Result<Self> {
        let config_path = config.as_ref().to_path_buf();
        let schema_path = match schema {
            Some(sch) => sch.as_ref().to_path_buf(),
            None => default_schema_by_init(&config_path),
        };

        let schema = read_schema(&schema_path)?;
        let config = if config_path.exists() {
            read_config(&config_path)?
        } else {
            warn!(
                "config file {} does not exist, using no existing values",
                config_path.display()
            );
            Config::new()
        };

        Ok(AppData {
            schema,
            config,
            schema_path,
            config_path,
        })
    }

    /// Schema with the config values merged in.
    pub fn migrated(&self) -> Schema {
        append_existing_values(&self.schema, &self.config)
    }
}
