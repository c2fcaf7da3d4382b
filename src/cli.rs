//! CLI types for chatpulse.
//!
//! This module contains:
//! - [`Args`] - command-line arguments (clap)
//! - [`OutputFormat`] - output format options
//!
//! `Args` turns itself into the library configuration types, so the binary
//! only wires I/O around [`Analyzer`](crate::pipeline::Analyzer):
//!
//! ```rust
//! use chatpulse::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatpulse", "chat.txt", "--exclude-unknown"]);
//! let config = args.analysis_config().unwrap();
//! assert_eq!(config.summary.unknown_policy, chatpulse::config::UnknownPolicy::Exclude);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::category::{NameOrNumber, Roster};
use crate::config::{AnalysisConfig, SummaryConfig, UnknownPolicy};
use crate::core::filter::FilterConfig;
use crate::core::output::OutputConfig;
use crate::error::Result;

/// Daily mentor/student activity statistics from an exported WhatsApp chat.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpulse")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpulse chat.txt
    chatpulse chat.txt --exclude-unknown --anomalies
    chatpulse chat.txt -f csv -o daily.csv
    chatpulse chat.txt --after 2024-01-01 --before 2024-03-31 -f json
    chatpulse chat.txt --mentor \"Dr. Rao\" --student Priya
    cat chat.txt | chatpulse -")]
pub struct Args {
    /// Path to the exported chat log ("-" reads stdin)
    pub input: String,

    /// Path to output file (default: print to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only count messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only count messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Only count messages from this sender
    #[arg(long, value_name = "SENDER")]
    pub from: Option<String>,

    /// Leave senders that are neither mentor nor student out of the statistics
    #[arg(long)]
    pub exclude_unknown: bool,

    /// Treat this sender as a mentor (repeatable)
    #[arg(long, value_name = "NAME")]
    pub mentor: Vec<String>,

    /// Treat this sender as a student (repeatable)
    #[arg(long, value_name = "NAME")]
    pub student: Vec<String>,

    /// Report parse anomalies on stderr (and in JSON output)
    #[arg(short, long)]
    pub anomalies: bool,

    /// Include message bodies in JSONL output
    #[arg(long)]
    pub body: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the record filters from `--after`, `--before` and `--from`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`](crate::ChatpulseError::InvalidDate)
    /// for a malformed date and
    /// [`ChatpulseError::InvalidRange`](crate::ChatpulseError::InvalidRange)
    /// when `--after` is later than `--before`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        filter.window()?;
        Ok(filter)
    }

    /// Builds the full analysis configuration.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let policy = if self.exclude_unknown {
            UnknownPolicy::Exclude
        } else {
            UnknownPolicy::Include
        };

        Ok(AnalysisConfig::new()
            .with_summary(SummaryConfig::new().with_unknown_policy(policy))
            .with_filter(self.filter_config()?))
    }

    /// Builds the output configuration.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.anomalies {
            config = config.with_anomalies();
        }
        if self.body {
            config = config.with_body();
        }
        config
    }

    /// Builds the sender classifier from `--mentor` and `--student`.
    pub fn roster(&self) -> Roster<NameOrNumber> {
        let roster = self
            .mentor
            .iter()
            .fold(Roster::new(NameOrNumber), |roster, name| roster.with_mentor(name));
        self.student
            .iter()
            .fold(roster, |roster, name| roster.with_student(name))
    }

    /// Returns `true` if the input is stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}

/// Output format options.
///
/// - [`Text`](OutputFormat::Text) - summary, one metric per line
/// - [`Csv`](OutputFormat::Csv) - daily series for charting
/// - [`Json`](OutputFormat::Json) - report and daily rows
/// - [`Jsonl`](OutputFormat::Jsonl) - one message per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain-text summary (default)
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Daily counts, semicolon delimited
    Csv,

    /// Summary report plus daily rows
    Json,

    /// JSON Lines - one message per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Text => crate::format::OutputFormat::Text,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, ParticipantClassifier};
    use crate::error::ChatpulseError;
    use chrono::NaiveDate;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["chatpulse", "chat.txt"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let args = args(&[]);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.output.is_none());
        assert!(!args.reads_stdin());

        let config = args.analysis_config().unwrap();
        assert_eq!(config.summary.unknown_policy, UnknownPolicy::Include);
        assert!(!config.filter.is_active());
    }

    #[test]
    fn test_date_filters() {
        let args = args(&["--after", "2024-01-01", "--before", "2024-01-31"]);
        let filter = args.filter_config().unwrap();
        assert_eq!(filter.after, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.window().unwrap().unwrap().days(), 31);
    }

    #[test]
    fn test_invalid_dates_rejected() {
        let bad = args(&["--after", "01/01/2024"]);
        assert!(matches!(
            bad.filter_config(),
            Err(ChatpulseError::InvalidDate { .. })
        ));

        let inverted = args(&["--after", "2024-02-01", "--before", "2024-01-01"]);
        assert!(matches!(
            inverted.filter_config(),
            Err(ChatpulseError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_roster_overrides() {
        let args = args(&["--mentor", "+15550001", "--student", "Priya", "--student", "Sam"]);
        let roster = args.roster();
        assert_eq!(roster.classify("+15550001"), Category::Mentor);
        assert_eq!(roster.classify("priya"), Category::Student);
        assert_eq!(roster.classify("Sam"), Category::Student);
        assert_eq!(roster.classify("Alice"), Category::Mentor);
    }

    #[test]
    fn test_output_flags() {
        let args = args(&["-f", "jsonl", "--anomalies", "--body", "-o", "out.jsonl"]);
        assert_eq!(args.format, OutputFormat::Jsonl);
        assert_eq!(args.output.as_deref(), Some("out.jsonl"));
        let output = args.output_config();
        assert!(output.include_anomalies && output.include_body);
    }

    #[test]
    fn test_format_conversion() {
        let lib: crate::format::OutputFormat = OutputFormat::Csv.into();
        assert_eq!(lib, crate::format::OutputFormat::Csv);
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
    }

    #[test]
    fn test_stdin_input() {
        let args = Args::parse_from(["chatpulse", "-"]);
        assert!(args.reads_stdin());
    }
}
