//! Parser-like option store.
//!
//! [`OptionStore`] is the seam between the core operations and whatever reads
//! or writes INI text. [`ConfigStore`] is the bundled implementation: an
//! ordered in-memory store that parses INI text with `rust-ini` and renders
//! itself back to INI text, comment entries included.

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;
use ini::{Ini, ParseOption};

use crate::data::Config;
use crate::error::{Error, Result};

/// Whether an option key is a comment entry (`# ...` or `; ...`).
pub fn is_comment(key: &str) -> bool {
    key.starts_with('#') || key.starts_with(';')
}

/// Capabilities of a config parser: enumerate, look up and set options.
pub trait OptionStore {
    /// Section names in insertion order.
    fn sections(&self) -> Vec<&str>;

    /// Whether `section` exists.
    fn has_section(&self, section: &str) -> bool {
        self.sections().contains(&section)
    }

    /// Create `section` if it does not exist yet.
    fn add_section(&mut self, section: &str);

    /// Option keys of `section`, comment entries included.
    ///
    /// # Errors
    ///
    /// [`Error::SectionNotFound`] when the section does not exist.
    fn options(&self, section: &str) -> Result<Vec<&str>>;

    /// Value of an option; `None` for value-less entries such as comments.
    ///
    /// # Errors
    ///
    /// [`Error::SectionNotFound`] or [`Error::OptionNotFound`].
    fn get(&self, section: &str, option: &str) -> Result<Option<&str>>;

    /// Set an option value in an existing section.
    ///
    /// Comment keys are appended as new entries every time; other keys are
    /// replaced in place.
    ///
    /// # Errors
    ///
    /// [`Error::SectionNotFound`] when the section does not exist.
    fn set(&mut self, section: &str, option: &str, value: Option<&str>) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: Option<String>,
}

/// Ordered in-memory [`OptionStore`] that reads and writes INI text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    sections: IndexMap<String, Vec<Entry>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text.
    ///
    /// Values are taken literally: backslashes and quotes are kept. Indented
    /// lines continue the value above them, joined with `\n`. Options outside
    /// of any section are ignored with a warning; repeated options keep the
    /// last value.
    pub fn parse(text: &str) -> Result<Self> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..Default::default()
        };
        let text = pad_trailing_backslashes(text);
        let ini = Ini::load_from_str_opt(&text, opt).map_err(|e| Error::parse("INI", e))?;
        let mut store = Self::new();
        for (section, properties) in ini.iter() {
            let Some(section) = section else {
                let count = properties.len();
                if count > 0 {
                    warn!("ignoring {count} option(s) outside of any section");
                }
                continue;
            };
            store.add_section(section);
            for (key, value) in properties.iter() {
                store.set(section, key, Some(value))?;
            }
        }
        debug!("parsed INI text with {} section(s)", store.sections.len());
        Ok(store)
    }

    /// Render as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_string()
    }

    fn section_entries(&self, section: &str) -> Result<&Vec<Entry>> {
        self.sections.get(section).ok_or_else(|| Error::SectionNotFound {
            section: section.to_string(),
        })
    }
}

impl OptionStore for ConfigStore {
    fn sections(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    fn add_section(&mut self, section: &str) {
        self.sections.entry(section.to_string()).or_default();
    }

    fn options(&self, section: &str) -> Result<Vec<&str>> {
        Ok(self
            .section_entries(section)?
            .iter()
            .map(|e| e.key.as_str())
            .collect())
    }

    fn get(&self, section: &str, option: &str) -> Result<Option<&str>> {
        self.section_entries(section)?
            .iter()
            .rev()
            .find(|e| e.key == option)
            .map(|e| e.value.as_deref())
            .ok_or_else(|| Error::OptionNotFound {
                section: section.to_string(),
                option: option.to_string(),
            })
    }

    fn set(&mut self, section: &str, option: &str, value: Option<&str>) -> Result<()> {
        let entries = self
            .sections
            .get_mut(section)
            .ok_or_else(|| Error::SectionNotFound {
                section: section.to_string(),
            })?;
        let value = value.map(str::to_string);

        if !is_comment(option)
            && let Some(entry) = entries.iter_mut().find(|e| e.key == option)
        {
            entry.value = value;
            return Ok(());
        }
        entries.push(Entry {
            key: option.to_string(),
            value,
        });
        Ok(())
    }
}

/// Keep a backslash at the end of a line from joining the next line.
///
/// The padding space is trimmed off the value again by the parser.
fn pad_trailing_backslashes(text: &str) -> Cow<'_, str> {
    if !text.lines().any(|l| l.ends_with('\\')) {
        return Cow::Borrowed(text);
    }
    let mut padded = String::with_capacity(text.len() + 8);
    for line in text.lines() {
        padded.push_str(line);
        if line.ends_with('\\') {
            padded.push(' ');
        }
        padded.push('\n');
    }
    Cow::Owned(padded)
}

/// Indent of continuation lines of multi-line values.
const CONTINUATION: &str = "    ";

fn write_comment(f: &mut fmt::Formatter<'_>, comment: &str) -> fmt::Result {
    for line in comment.lines() {
        if is_comment(line) {
            writeln!(f, "{line}")?;
        } else {
            writeln!(f, "# {line}")?;
        }
    }
    Ok(())
}

impl fmt::Display for ConfigStore {
    /// Every line a comment entry spans is written as a comment, and values
    /// spanning lines continue on indented lines, so the text parses back to
    /// the same entries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, entries)) in self.sections.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{name}]")?;
            for entry in entries {
                match &entry.value {
                    _ if is_comment(&entry.key) => write_comment(f, &entry.key)?,
                    Some(value) => {
                        let mut lines = value.split('\n');
                        writeln!(f, "{} = {}", entry.key, lines.next().unwrap_or_default())?;
                        for line in lines {
                            writeln!(f, "{CONTINUATION}{line}")?;
                        }
                    }
                    None => writeln!(f, "{}", entry.key)?,
                }
            }
        }
        Ok(())
    }
}

impl From<&ConfigStore> for Config {
    /// Keep real options only; value-less options become empty strings.
    fn from(store: &ConfigStore) -> Self {
        let mut config = Config::new();
        for (section, entries) in &store.sections {
            config.add_section(section.as_str());
            for entry in entries.iter().filter(|e| !is_comment(&e.key)) {
                config.set(
                    section.as_str(),
                    entry.key.as_str(),
                    entry.value.clone().unwrap_or_default(),
                );
            }
        }
        config
    }
}

impl From<&Config> for ConfigStore {
    fn from(config: &Config) -> Self {
        let mut store = ConfigStore::new();
        for (section, options) in config.sections() {
            let entries = store.sections.entry(section.to_string()).or_default();
            entries.extend(options.iter().map(|(key, value)| Entry {
                key: key.clone(),
                value: Some(value.clone()),
            }));
        }
        store
    }
}

/// Parse INI text straight into a [`Config`].
pub fn parse_config(text: &str) -> Result<Config> {
    ConfigStore::parse(text).map(|store| Config::from(&store))
}
