//! JSON output writer.

use std::fs::File;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::anomaly::Anomaly;
use crate::category::Category;
use crate::core::summary::SummaryReport;
use crate::error::Result;
use crate::pipeline::Analysis;

use super::OutputConfig;

/// Document written by [`write_json`].
#[derive(Serialize)]
struct JsonReport<'a> {
    /// `null` when there is no data.
    summary: Option<&'a SummaryReport>,
    daily: Vec<JsonDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anomalies: Option<&'a [Anomaly]>,
}

#[derive(Serialize)]
struct JsonDay {
    date: NaiveDate,
    mentor: u64,
    student: u64,
    /// Omitted when the report excludes unknown senders.
    #[serde(skip_serializing_if = "Option::is_none")]
    unknown: Option<u64>,
}

impl<'a> JsonReport<'a> {
    fn from_analysis(analysis: &'a Analysis, config: &OutputConfig) -> Self {
        let reports_unknown = analysis
            .report
            .as_ref()
            .is_none_or(|report| report.reported_categories().contains(&Category::Unknown));
        let daily = analysis
            .series
            .iter()
            .flat_map(|series| series.rows())
            .map(|(date, [mentor, student, unknown])| JsonDay {
                date,
                mentor,
                student,
                unknown: reports_unknown.then_some(unknown),
            })
            .collect();

        Self {
            summary: analysis.report.as_ref(),
            daily,
            anomalies: config
                .include_anomalies
                .then_some(analysis.anomalies.as_slice()),
        }
    }
}

/// Writes the summary report and daily rows to a JSON file.
///
/// # Format
/// ```json
/// {
///   "summary": {"date_range": {"start": "2023-01-01", "end": "2023-01-02"}, ...},
///   "daily": [{"date": "2023-01-01", "mentor": 1, "student": 1, "unknown": 0}],
///   "anomalies": [...]
/// }
/// ```
pub fn write_json(analysis: &Analysis, output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(analysis, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the analysis to a pretty-printed JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(analysis: &Analysis, config: &OutputConfig) -> Result<String> {
    let report = JsonReport::from_analysis(analysis, config);
    Ok(serde_json::to_string_pretty(&report)?)
}
