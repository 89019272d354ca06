//! Error types for the carlog library.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for carlog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while classifying log lines and writing reports.
///
/// A field that is missing from a match, or a line rejected by the rim check,
/// is never an error: those are ordinary outcomes of classification.
#[derive(Error, Debug)]
pub enum Error {
    /// A classification rule could not be compiled.
    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// The outer access-log line pattern could not be compiled.
    #[error("invalid line pattern '{pattern}': {source}")]
    InvalidLinePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A log line doesn't match the outer line pattern.
    #[error("log line '{line}' does not match the access log pattern")]
    LineFormatMismatch { line: String },

    /// The status group matched but is not a valid status code.
    #[error("status '{value}' is not a valid HTTP status code")]
    InvalidStatus {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// An output store already exists when its creation phase runs.
    #[error("{store} '{}' already exists, aborting", .path.display())]
    StoreExists { store: &'static str, path: PathBuf },

    /// The combined store is missing when the report is requested.
    #[error("{store} '{}' doesn't exist, please parse first, aborting", .path.display())]
    StoreMissing { store: &'static str, path: PathBuf },

    /// The log directory cannot be listed.
    #[error("cannot read log directory '{}': {source}", .path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error when reading logs or writing a store.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a new invalid rule pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: fancy_regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source: Box::new(source),
        }
    }

    /// Create a new invalid line pattern error.
    pub fn invalid_line_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidLinePattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a new line format mismatch error.
    pub fn line_format_mismatch(line: impl Into<String>) -> Self {
        Self::LineFormatMismatch { line: line.into() }
    }

    /// Create a new invalid status error.
    pub fn invalid_status(value: impl Into<String>, source: std::num::ParseIntError) -> Self {
        Self::InvalidStatus {
            value: value.into(),
            source,
        }
    }

    /// Create a new store exists error.
    pub fn store_exists(store: &'static str, path: impl AsRef<Path>) -> Self {
        Self::StoreExists {
            store,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new store missing error.
    pub fn store_missing(store: &'static str, path: impl AsRef<Path>) -> Self {
        Self::StoreMissing {
            store,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new log directory error.
    pub fn log_directory(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::LogDirectory {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error only affects a single line and processing can go on.
    pub fn is_line_local(&self) -> bool {
        match self {
            Self::LineFormatMismatch { .. } | Self::InvalidStatus { .. } => true,
            Self::Io { source } => source.kind() == std::io::ErrorKind::InvalidData,
            _ => false,
        }
    }
}
