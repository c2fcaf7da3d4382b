//! # Chatpulse
//!
//! A Rust library for turning exported WhatsApp chat logs into daily
//! mentor/student activity statistics.
//!
//! ## Overview
//!
//! Chatpulse reads the plain-text export of a chat and:
//! - rebuilds each message from its header line and continuation lines
//! - classifies every sender as **Mentor** (shown by name), **Student**
//!   (shown by phone number) or **Unknown**
//! - counts messages per calendar day, with explicit zero days
//! - summarises totals, daily averages, extremes, silent days and the most
//!   active category
//!
//! Malformed lines never abort a run. They are returned as
//! [`Anomaly`](anomaly::Anomaly) values next to the results.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatpulse::prelude::*;
//!
//! let log = "\
//! 1/1/23, 10:00 am - Alice: Hello
//! 1/1/23, 10:05 am - +15551234567: Hi
//! how are you?
//! 2/1/23, 9:00 am - Alice: Morning";
//!
//! let analysis = analyze(log);
//! let report = analysis.report.as_ref().unwrap();
//!
//! assert_eq!(report.total(Category::Mentor), 2);
//! assert_eq!(report.total(Category::Student), 1);
//! assert_eq!(report.zero_activity_days, 0);
//! println!("{}", analysis.render());
//! ```
//!
//! ## Step by Step
//!
//! Each stage is a plain function over the previous stage's output:
//!
//! ```rust
//! use chatpulse::prelude::*;
//!
//! let parsed = parse("1/1/23, 10:00 am - Alice: Hello\n3/1/23, 9:00 pm - Alice: Back");
//! let series = aggregate(&parsed.records).expect("at least one record");
//! let report = summarize(&series, &SummaryConfig::default());
//!
//! assert_eq!(series.counts(Category::Mentor), &[1, 0, 1]);
//! assert_eq!(report.zero_activity_days, 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - Line classifier and the header grammar table
//! - [`parser`] - Message parser ([`LogParser`](parser::LogParser), [`parse`])
//! - [`category`] - Participant classifier ([`Category`], [`ParticipantClassifier`](category::ParticipantClassifier))
//! - [`core`] - Filters, daily aggregation, summary statistics, rendering and writers
//! - [`pipeline`] - [`Analyzer`](pipeline::Analyzer) chaining every stage
//! - [`config`] - Parser, summary and analysis configuration
//! - [`format`] - Output format selection
//! - [`anomaly`] - Non-fatal parsing irregularities
//! - [`error`] - Error types ([`ChatpulseError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod anomaly;
pub mod category;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod pipeline;

// Re-export the main types at the crate root for convenience
pub use category::Category;
pub use error::{ChatpulseError, Result};
pub use message::MessageRecord;
pub use parser::parse;
pub use pipeline::analyze;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatpulse::prelude::*;
/// ```
pub mod prelude {
    // Core record types
    pub use crate::{Category, MessageRecord};

    // Error types
    pub use crate::error::{ChatpulseError, Result};

    // Anomalies
    pub use crate::anomaly::{Anomaly, AnomalyKind};

    // Classification
    pub use crate::category::{NameOrNumber, ParticipantClassifier, Roster, classify_sender};

    // Configuration
    pub use crate::config::{AnalysisConfig, ParserConfig, SummaryConfig, UnknownPolicy};

    // Parsing
    pub use crate::parser::{LogParser, ParseOutput, parse};
    pub use crate::parsing::{HeaderFormat, LineClassifier};

    // Analysis stages
    pub use crate::core::{
        CategoryStats, DailySeries, DateRange, FilterConfig, SummaryReport, aggregate,
        aggregate_over, apply_filters, render, summarize,
    };

    // Pipeline
    pub use crate::pipeline::{Analysis, Analyzer, analyze};

    // Output (file writers and string converters)
    pub use crate::core::output::OutputConfig;
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
