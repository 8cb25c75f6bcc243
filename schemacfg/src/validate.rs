//! Checks of a config against a schema.
//!
//! Only presence is checked. Values are never parsed against the `type`
//! hint of an option.

use std::fmt;

use crate::data::{Config, Schema};
use crate::merge::{UnknownKey, unknown_options};

/// How serious an [`Issue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// One finding of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub section: String,
    /// `None` when the finding is about the whole section.
    pub option: Option<String>,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.option {
            Some(option) => write!(f, "[{}] {}: {}", self.section, option, self.message),
            None => write!(f, "[{}]: {}", self.section, self.message),
        }
    }
}

/// Findings of a config check, in schema order followed by unknown keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// No errors were found; warnings are allowed.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    fn push(
        &mut self,
        severity: Severity,
        section: &str,
        option: Option<&str>,
        message: impl Into<String>,
    ) {
        self.issues.push(Issue {
            severity,
            section: section.to_string(),
            option: option.map(str::to_string),
            message: message.into(),
        });
    }
}

/// Check `config` against `schema`.
///
/// - a required option missing from the config is an error, even when the
///   schema gives it a default;
/// - a deprecated option set in the config is a warning;
/// - a section or option the schema does not declare is a warning.
pub fn validate(schema: &Schema, config: &Config) -> Report {
    let mut report = Report::default();

    for (section, option, spec) in schema.options() {
        let present = config.get(section, option).is_some();
        if spec.required && !present {
            report.push(
                Severity::Error,
                section,
                Some(option),
                "required option is missing",
            );
        }
        if spec.deprecated && present {
            report.push(
                Severity::Warning,
                section,
                Some(option),
                "option is deprecated",
            );
        }
    }

    for key in unknown_options(schema, config) {
        match key {
            UnknownKey::Section(section) => {
                report.push(Severity::Warning, &section, None, "unknown section")
            }
            UnknownKey::Option { section, option } => report.push(
                Severity::Warning,
                &section,
                Some(&option),
                "unknown option",
            ),
        }
    }

    debug!(
        "config check: {} error(s), {} warning(s)",
        report.errors().count(),
        report.warnings().count()
    );
    report
}
