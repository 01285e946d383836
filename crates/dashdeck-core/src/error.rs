//! Error types for dashdeck-core.
//!
//! Only two things can go wrong in the data layer: a form submission can fail
//! validation, and the preference file can fail to read or write. Neither is
//! fatal; callers surface them as toasts and carry on.

use std::path::PathBuf;

/// A form submission was rejected. No state was changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field did not parse as a non-negative integer.
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A field did not match one of its allowed values.
    #[error(transparent)]
    InvalidChoice(#[from] ParseEnumError),

    /// The record being edited no longer exists.
    #[error("no record with id {0}")]
    UnknownId(String),
}

/// Text did not name a variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self { kind, value: value.into() }
    }
}

/// Reading or writing the preference file failed.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize {key}: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
