//! Unified error types for chatpulse.
//!
//! This module provides a single [`ChatpulseError`] enum that covers every
//! fatal error in the library.
//!
//! Malformed lines inside a chat log are *not* errors: they are reported as
//! [`Anomaly`](crate::anomaly::Anomaly) values next to the parsed records.
//! A `ChatpulseError` means the run itself could not proceed (unreadable or
//! non-UTF-8 input, a broken user-supplied grammar, an unwritable output).

use std::io;

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized [`Result`] type for chatpulse operations.
///
/// # Example
///
/// ```rust
/// use chatpulse::error::Result;
/// use chatpulse::MessageRecord;
///
/// fn load() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatpulseError>;

/// The error type for all chatpulse operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpulseError {
    /// An I/O error occurred.
    ///
    /// Only raised by the file-based helpers (reading a log, writing an export);
    /// the analysis engine itself performs no I/O.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid UTF-8 text.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A header grammar's regular expression failed to compile.
    #[error("Invalid header pattern '{name}': {source}")]
    InvalidPattern {
        /// Name of the offending header format
        name: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The requested output format is unknown or not compiled in.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An explicit date window ends before it starts.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        /// First day of the requested window
        start: NaiveDate,
        /// Last day of the requested window
        end: NaiveDate,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpulseError {
    /// Creates a UTF-8 error for the given context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatpulseError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid pattern error for a header format.
    pub fn invalid_pattern(name: impl Into<String>, source: regex::Error) -> Self {
        ChatpulseError::InvalidPattern {
            name: name.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatpulseError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatpulseError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpulseError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatpulseError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            ChatpulseError::InvalidDate { .. } | ChatpulseError::InvalidRange { .. }
        )
    }
}
