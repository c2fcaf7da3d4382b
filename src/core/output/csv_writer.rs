//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::category::Category;
use crate::error::{ChatpulseError, Result};
use crate::pipeline::Analysis;

/// Writes the daily series to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Date`, then one column per reported category
///   (`Mentor`, `Student`, and `Unknown` unless the report excludes it)
/// - One row per day of the range, zero days included
/// - No data: header row only
pub fn write_csv(analysis: &Analysis, output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    write_series(analysis, file)
}

/// Converts the daily series to a CSV string.
///
/// Same format as `write_csv`, but returns a String instead of writing to file.
pub fn to_csv(analysis: &Analysis) -> Result<String> {
    let mut buffer = Vec::new();
    write_series(analysis, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ChatpulseError::utf8("CSV output", e))
}

fn write_series<W: Write>(analysis: &Analysis, sink: W) -> Result<()> {
    let categories = reported_categories(analysis);
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    let mut header = vec!["Date"];
    header.extend(categories.iter().map(|c| c.label()));
    writer.write_record(&header)?;

    if let Some(series) = &analysis.series {
        for day in series.dates() {
            let mut record = vec![day.format("%Y-%m-%d").to_string()];
            record.extend(categories.iter().map(|&c| series.count_on(c, day).to_string()));
            writer.write_record(&record)?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn reported_categories(analysis: &Analysis) -> &'static [Category] {
    analysis
        .report
        .as_ref()
        .map_or(&Category::ALL, |report| report.reported_categories())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfig, SummaryConfig, UnknownPolicy};
    use crate::pipeline::{Analyzer, analyze};
    use tempfile::NamedTempFile;

    const LOG: &str = "1/1/23, 10:00 am - Alice: Hello\n3/1/23, 9:00 am - +4412345: Hi";

    #[test]
    fn test_write_csv_basic() {
        let analysis = analyze(LOG);

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        write_csv(&analysis, path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "Date;Mentor;Student;Unknown\n\
             2023-01-01;1;0;0\n\
             2023-01-02;0;0;0\n\
             2023-01-03;0;1;0\n"
        );
    }

    #[test]
    fn test_csv_excludes_unknown_column() {
        let config = AnalysisConfig::new()
            .with_summary(SummaryConfig::new().with_unknown_policy(UnknownPolicy::Exclude));
        let analysis = Analyzer::new(config).unwrap().analyze(LOG);

        let csv = to_csv(&analysis).unwrap();
        assert!(csv.starts_with("Date;Mentor;Student\n"));
        assert!(csv.contains("2023-01-03;0;1\n"));
    }

    #[test]
    fn test_csv_no_data_is_header_only() {
        let csv = to_csv(&analyze("")).unwrap();
        assert_eq!(csv, "Date;Mentor;Student;Unknown\n");
    }
}
