//! Output format types for the chatpulse library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks, so they can be used from any embedding program.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatpulse::Result<()> {
//! use chatpulse::format::{OutputFormat, write_to_format};
//! use chatpulse::core::output::OutputConfig;
//! use chatpulse::pipeline::analyze;
//!
//! let analysis = analyze("1/1/23, 10:00 am - Alice: Hello");
//!
//! // Write using format enum
//! write_to_format(&analysis, "daily.csv", OutputFormat::Csv, &OutputConfig::new())?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("report.json")?;
//! assert_eq!(format, OutputFormat::Json);
//! # Ok(())
//! # }
//! ```

use std::fs;

use serde::{Deserialize, Serialize};

use crate::core::output::OutputConfig;
use crate::error::ChatpulseError;
use crate::pipeline::Analysis;

/// Output format for analysis results.
///
/// - [`Text`](OutputFormat::Text) - the plain-text summary, one metric per line
/// - [`Csv`](OutputFormat::Csv) - the daily series, ready for charting
/// - [`Json`](OutputFormat::Json) - summary report and daily rows
/// - [`Jsonl`](OutputFormat::Jsonl) - one parsed message per line
///
/// # Example
///
/// ```rust
/// use chatpulse::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Plain-text summary (default)
    #[default]
    Text,

    /// Daily counts, semicolon delimited
    Csv,

    /// Summary report plus daily rows
    Json,

    /// JSON Lines - one message per line
    ///
    /// Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Text,
            OutputFormat::Csv,
            OutputFormat::Json,
            OutputFormat::Jsonl,
        ]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatpulse::format::OutputFormat;
    ///
    /// let format = OutputFormat::from_path("summary.txt").unwrap();
    /// assert_eq!(format, OutputFormat::Text);
    /// ```
    pub fn from_path(path: &str) -> Result<Self, ChatpulseError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatpulseError::invalid_format(
                "output",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: txt, csv, json, jsonl",
                    ext
                ),
            )),
        }
    }

    /// Name of the cargo feature this format needs, if any.
    fn required_feature(self) -> Option<&'static str> {
        match self {
            OutputFormat::Text => None,
            OutputFormat::Csv => Some("csv-output"),
            OutputFormat::Json | OutputFormat::Jsonl => Some("json-output"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the analysis to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    analysis: &Analysis,
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ChatpulseError> {
    match format {
        OutputFormat::Text => Ok(fs::write(path, analysis.render())?),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(analysis, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(analysis, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(analysis, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Converts the analysis to a string in the specified format.
///
/// # Example
///
/// ```rust
/// use chatpulse::format::{OutputFormat, to_format_string};
/// use chatpulse::core::output::OutputConfig;
/// use chatpulse::pipeline::analyze;
///
/// let analysis = analyze("1/1/23, 10:00 am - Alice: Hello");
/// let text = to_format_string(&analysis, OutputFormat::Text, &OutputConfig::new()).unwrap();
/// assert!(text.starts_with("Chat Start Date: 2023-01-01"));
/// ```
#[allow(unused_variables)]
pub fn to_format_string(
    analysis: &Analysis,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatpulseError> {
    match format {
        OutputFormat::Text => Ok(analysis.render()),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(analysis),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(analysis, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(analysis, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

#[allow(dead_code)]
fn feature_disabled(format: OutputFormat) -> ChatpulseError {
    ChatpulseError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            format.required_feature().unwrap_or("default")
        ),
    )
}
