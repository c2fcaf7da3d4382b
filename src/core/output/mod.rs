//! Output format writers.
//!
//! This module provides writers for the results of an [`Analysis`](crate::pipeline::Analysis):
//! - [`write_csv`] / [`to_csv`] - daily series, one row per day, semicolon delimited - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - summary report plus daily rows - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one parsed message per line - requires `json-output` feature
//!
//! The plain-text summary needs no writer: see [`render`](crate::core::render::render).
//!
//! # Choosing a Format
//!
//! | Format | Content | Typical consumer |
//! |--------|---------|------------------|
//! | CSV | `Date;Mentor;Student[;Unknown]` | Spreadsheets, chart tools |
//! | JSON | Report + daily rows (+ anomalies) | Dashboards, APIs |
//! | JSONL | Messages | Further processing, audits |
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatpulse::Result<()> {
//! use chatpulse::core::output::to_csv;
//! use chatpulse::pipeline::analyze;
//!
//! let analysis = analyze("1/1/23, 10:00 am - Alice: Hello\n2/1/23, 9:00 am - +4412345: Hi");
//! let csv = to_csv(&analysis)?;
//!
//! assert!(csv.starts_with("Date;Mentor;Student;Unknown\n"));
//! assert!(csv.contains("2023-01-01;1;0;0\n"));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use serde::{Deserialize, Serialize};

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

/// Configuration for output generation.
///
/// Controls which optional parts end up in an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include parse anomalies in JSON output
    pub include_anomalies: bool,
    /// Include message bodies in JSONL output
    pub include_body: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_anomalies(mut self) -> Self {
        self.include_anomalies = true;
        self
    }

    #[must_use]
    pub fn with_body(mut self) -> Self {
        self.include_body = true;
        self
    }
}
