//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - header grammar table used by the message parser
//! - [`SummaryConfig`] - how summary statistics treat `Unknown` senders
//! - [`AnalysisConfig`] - everything the [`Analyzer`](crate::pipeline::Analyzer) needs
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::{AnalysisConfig, SummaryConfig, UnknownPolicy};
//!
//! let config = AnalysisConfig::new()
//!     .with_summary(SummaryConfig::new().with_unknown_policy(UnknownPolicy::Exclude));
//!
//! assert_eq!(config.summary.unknown_policy, UnknownPolicy::Exclude);
//! ```

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::core::filter::FilterConfig;
use crate::parsing::HeaderFormat;

/// Configuration for the message parser.
///
/// # Example
///
/// ```rust
/// use chatpulse::config::ParserConfig;
/// use chatpulse::parsing::HeaderFormat;
///
/// let config = ParserConfig::new().with_format(HeaderFormat::new(
///     "iso-24h",
///     r"^(\d{4}-\d{2}-\d{2})\s(\d{2}:\d{2})\s\|\s",
///     &["%Y-%m-%d, %H:%M"],
/// ));
///
/// assert_eq!(config.header_formats.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Header grammars, tried in order (default: the built-in table)
    pub header_formats: Vec<HeaderFormat>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_formats: HeaderFormat::builtin(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with the built-in grammars.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a grammar after the existing ones.
    #[must_use]
    pub fn with_format(mut self, format: HeaderFormat) -> Self {
        self.header_formats.push(format);
        self
    }

    /// Replaces the whole grammar table.
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<HeaderFormat>) -> Self {
        self.header_formats = formats;
        self
    }
}

/// Whether `Unknown` senders take part in the summary statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// `Unknown` gets its own totals/averages/extremes, counts towards
    /// activity and may be the most active category.
    #[default]
    Include,
    /// `Unknown` messages are ignored by every summary metric.
    Exclude,
}

impl UnknownPolicy {
    /// Categories the summary reports on under this policy, in priority order.
    pub fn categories(self) -> &'static [Category] {
        match self {
            UnknownPolicy::Include => &Category::ALL,
            UnknownPolicy::Exclude => &[Category::Mentor, Category::Student],
        }
    }
}

/// Configuration for the summary statistics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Treatment of `Unknown` senders (default: include)
    pub unknown_policy: UnknownPolicy,
}

impl SummaryConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Unknown` sender policy.
    #[must_use]
    pub fn with_unknown_policy(mut self, policy: UnknownPolicy) -> Self {
        self.unknown_policy = policy;
        self
    }
}

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Parser settings
    pub parser: ParserConfig,
    /// Summary settings
    pub summary: SummaryConfig,
    /// Record filters applied before aggregation
    pub filter: FilterConfig,
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parser configuration.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Sets the summary configuration.
    #[must_use]
    pub fn with_summary(mut self, summary: SummaryConfig) -> Self {
        self.summary = summary;
        self
    }

    /// Sets the record filters.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}
