//! The outer envelope of one access-log line.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Date, method, URI and status extracted from a raw access-log line.
///
/// Records are built per line and dropped once the line is processed; only
/// their fields end up in the combined store and the report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogRecord {
    /// The bracketed timestamp, verbatim.
    pub date: String,
    /// `GET` or `POST`.
    pub method: String,
    /// Request target, path and query string.
    pub uri: String,
    /// Three-digit response status.
    pub status: u16,
}

impl LogRecord {
    /// Create a new record.
    pub fn new(
        date: impl Into<String>,
        method: impl Into<String>,
        uri: impl Into<String>,
        status: u16,
    ) -> Self {
        Self {
            date: date.into(),
            method: method.into(),
            uri: uri.into(),
            status,
        }
    }
}
