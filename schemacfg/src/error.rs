//! Error types and result definitions.

use thiserror::Error;

/// Errors raised while reading schemas, configs or option stores.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema text parsed, but its shape is not section → option → attributes.
    #[error("malformed schema at `{section}`: {detail}")]
    MalformedSchema { section: String, detail: String },

    /// The config tree parsed, but its shape is not section → option → value.
    #[error("malformed config at `{section}`: {detail}")]
    MalformedConfig { section: String, detail: String },

    /// Lookup of a section the store does not hold.
    #[error("no section: `{section}`")]
    SectionNotFound { section: String },

    /// Lookup of an option the section does not hold.
    #[error("no option `{option}` in section `{section}`")]
    OptionNotFound { section: String, option: String },

    /// Text could not be parsed in the given format.
    #[error("failed to parse {format} text: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// Text could not be produced in the given format.
    #[error("failed to write {format} text: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },

    /// File extension or format name that has no parser.
    #[error("unsupported schema format: {0:?}")]
    UnsupportedFormat(String),
}

impl Error {
    pub(crate) fn malformed_schema(section: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::MalformedSchema {
            section: section.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn malformed_config(section: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::MalformedConfig {
            section: section.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn parse(format: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Parse {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn serialize(format: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Serialize {
            format,
            message: err.to_string(),
        }
    }

    /// Whether this is a "no such section/option" lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::SectionNotFound { .. } | Error::OptionNotFound { .. }
        )
    }
}

/// Result type alias for schemacfg operations.
pub type Result<T> = std::result::Result<T, Error>;
