//! Core analysis logic for chatpulse.
//!
//! This module contains:
//! - [`filter`] - Record filtering by date window, category and sender
//! - [`aggregate`] - Dense per-day counts per category
//! - [`summary`] - Totals, averages, extremes and the most active category
//! - [`render`] - Plain-text summary
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatpulse::core::{aggregate, render, summarize};
//! use chatpulse::config::SummaryConfig;
//! use chatpulse::parser::parse;
//!
//! let records = parse("1/1/23, 10:00 am - Alice: Hello").records;
//! let series = aggregate(&records).unwrap();
//! let report = summarize(&series, &SummaryConfig::default());
//! assert!(render(&report).contains("Total messages sent by Mentor: 1"));
//! ```

pub mod aggregate;
pub mod filter;
pub mod output;
pub mod render;
pub mod summary;

// Re-export main types for convenience
pub use aggregate::{DailySeries, DateRange, aggregate, aggregate_over};
pub use filter::{FilterConfig, apply_filters};
pub use output::OutputConfig;
pub use render::{render, render_no_data};
pub use summary::{CategoryStats, SummaryReport, summarize};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
