//! End-to-end analysis: text in, records, daily series and report out.
//!
//! [`Analyzer`] chains the stages in a fixed forward order:
//!
//! 1. parse the text into records and anomalies ([`LogParser`])
//! 2. apply the record filters ([`apply_filters`])
//! 3. bucket the records per day ([`aggregate`] / [`aggregate_over`])
//! 4. compute the statistics ([`summarize`])
//!
//! An analyzer holds only its configuration, so one instance can analyse
//! any number of inputs, from any number of threads.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::pipeline::analyze;
//! use chatpulse::Category;
//!
//! let analysis = analyze(
//!     "1/1/23, 10:00 am - Alice: Hello\n\
//!      1/1/23, 10:05 am - +15551234567: Hi\n\
//!      2/1/23, 9:00 am - Alice: Morning",
//! );
//!
//! let report = analysis.report.as_ref().unwrap();
//! assert_eq!(report.total(Category::Mentor), 2);
//! assert_eq!(report.most_active_category, Some(Category::Mentor));
//! ```

use std::path::Path;

use serde::Serialize;

use crate::MessageRecord;
use crate::anomaly::{Anomaly, AnomalyKind};
use crate::category::{NameOrNumber, ParticipantClassifier};
use crate::config::AnalysisConfig;
use crate::core::aggregate::{DailySeries, aggregate, aggregate_over};
use crate::core::filter::apply_filters;
use crate::core::render::{render, render_no_data};
use crate::core::summary::{SummaryReport, summarize};
use crate::error::Result;
use crate::parser::{LogParser, ParseOutput};

/// Everything one analysis run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Records that passed the filters, in order of appearance.
    pub records: Vec<MessageRecord>,
    /// Parse anomalies, plus `EmptyInput` when no record survived.
    pub anomalies: Vec<Anomaly>,
    /// Dense daily counts; `None` when there is no data.
    pub series: Option<DailySeries>,
    /// Summary statistics; `None` when there is no data.
    pub report: Option<SummaryReport>,
}

impl Analysis {
    /// Returns `true` if no record survived parsing and filtering.
    pub fn is_empty(&self) -> bool {
        self.report.is_none()
    }

    /// Renders the summary, or the "no data" text.
    pub fn render(&self) -> String {
        self.report.as_ref().map_or_else(render_no_data, render)
    }
}

/// Analyses the text with the default configuration.
pub fn analyze(text: &str) -> Analysis {
    Analyzer::default().analyze(text)
}

/// Configured analysis pipeline.
#[derive(Debug, Clone)]
pub struct Analyzer<C = NameOrNumber> {
    parser: LogParser<C>,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Creates an analyzer.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidPattern`](crate::ChatpulseError::InvalidPattern)
    /// if a header grammar does not compile.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        Ok(Self {
            parser: LogParser::with_config(&config.parser)?,
            config,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            parser: LogParser::new(),
            config: AnalysisConfig::default(),
        }
    }
}

impl<C: ParticipantClassifier> Analyzer<C> {
    /// Swaps the participant classifier.
    pub fn with_classifier<D: ParticipantClassifier>(self, participants: D) -> Analyzer<D> {
        Analyzer {
            parser: self.parser.with_classifier(participants),
            config: self.config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Runs the full pipeline over text held in memory.
    ///
    /// A date filter with `after` later than `before` matches nothing, so the
    /// result is "no data"; [`FilterConfig::window`](crate::core::filter::FilterConfig::window)
    /// reports that case as an error for callers who want to reject it early.
    pub fn analyze(&self, text: &str) -> Analysis {
        self.finish(self.parser.parse_str(text))
    }

    /// Runs the full pipeline over raw bytes, which must be UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::Utf8`](crate::ChatpulseError::Utf8) if the
    /// bytes are not valid UTF-8.
    pub fn analyze_bytes(&self, bytes: Vec<u8>) -> Result<Analysis> {
        Ok(self.finish(self.parser.parse_bytes(bytes)?))
    }

    /// Reads a file and runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8 text.
    pub fn analyze_file(&self, path: &Path) -> Result<Analysis> {
        Ok(self.finish(self.parser.parse_file(path)?))
    }

    fn finish(&self, parsed: ParseOutput) -> Analysis {
        let ParseOutput {
            records,
            mut anomalies,
        } = parsed;
        let parsed_count = records.len();
        let records = apply_filters(records, &self.config.filter);

        let series = if records.is_empty() {
            None
        } else {
            match self.config.filter.window() {
                Ok(Some(window)) => Some(aggregate_over(&records, window)),
                _ => aggregate(&records),
            }
        };

        if series.is_none() {
            anomalies.push(Anomaly::new(0, AnomalyKind::EmptyInput, ""));
        }

        let report = series
            .as_ref()
            .map(|series| summarize(series, &self.config.summary));

        tracing::info!(
            parsed = parsed_count,
            kept = records.len(),
            anomalies = anomalies.len(),
            days = series.as_ref().map_or(0, DailySeries::len),
            "analysis complete"
        );

        Analysis {
            records,
            anomalies,
            series,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::category::{Category, Roster};
    use crate::config::{SummaryConfig, UnknownPolicy};
    use crate::core::filter::FilterConfig;

    const LOG: &str = "\
1/1/23, 10:00 am - Alice: Hello
1/1/23, 10:05 am - +15551234567: Hi
there
2/1/23, 9:00 am - Alice: Morning";

    #[test]
    fn test_analyze_scenario() {
        let analysis = analyze(LOG);

        assert_eq!(analysis.records.len(), 3);
        assert_eq!(analysis.records[1].body, "Hi there");
        assert!(analysis.anomalies.is_empty());

        let series = analysis.series.as_ref().unwrap();
        assert_eq!(series.counts(Category::Mentor), &[1, 1]);
        assert_eq!(series.counts(Category::Student), &[1, 0]);

        let report = analysis.report.as_ref().unwrap();
        assert_eq!(report.zero_activity_days, 0);
        assert_eq!(report.total(Category::Mentor), 2);
        assert_eq!(report.total(Category::Student), 1);
        assert_eq!(report.most_active_category, Some(Category::Mentor));
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let analysis = analyze("");
        assert!(analysis.is_empty());
        assert!(analysis.series.is_none());
        assert_eq!(analysis.anomalies.len(), 1);
        assert_eq!(analysis.anomalies[0].kind, AnomalyKind::EmptyInput);
        assert_eq!(analysis.render(), "No data available\n");
    }

    #[test]
    fn test_filter_window_keeps_empty_edges() {
        let filter = FilterConfig::new()
            .with_after(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap())
            .with_before(NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        let analyzer = Analyzer::new(AnalysisConfig::new().with_filter(filter)).unwrap();
        let analysis = analyzer.analyze(LOG);

        let series = analysis.series.unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.counts(Category::Mentor), &[0, 1, 1, 0]);
        assert_eq!(analysis.report.unwrap().zero_activity_days, 2);
    }

    #[test]
    fn test_filter_removing_everything() {
        let filter = FilterConfig::new().with_sender("nobody");
        let analyzer = Analyzer::new(AnalysisConfig::new().with_filter(filter)).unwrap();
        let analysis = analyzer.analyze(LOG);

        assert!(analysis.is_empty());
        assert_eq!(analysis.anomalies[0].kind, AnomalyKind::EmptyInput);
    }

    #[test]
    fn test_with_classifier_and_policy() {
        let config = AnalysisConfig::new()
            .with_summary(SummaryConfig::new().with_unknown_policy(UnknownPolicy::Exclude));
        let analyzer = Analyzer::new(config)
            .unwrap()
            .with_classifier(Roster::new(|_: &str| Category::Unknown).with_mentor("Alice"));
        let analysis = analyzer.analyze(LOG);

        let report = analysis.report.unwrap();
        assert_eq!(report.total(Category::Mentor), 2);
        assert_eq!(report.total(Category::Student), 0);
        assert!(report.stats(Category::Unknown).is_none());
    }

    #[test]
    fn test_render_matches_report() {
        let analysis = analyze(LOG);
        let text = analysis.render();
        assert!(text.starts_with("Chat Start Date: 2023-01-01\nChat End Date: 2023-01-02\n"));
        assert!(text.contains("Average messages sent by Student per day: 0.50\n"));
    }
}
