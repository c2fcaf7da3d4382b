//! Plain-text rendering of a [`SummaryReport`].
//!
//! One metric per line, always in the same order:
//!
//! ```text
//! Chat Start Date: 2023-01-01
//! Chat End Date: 2023-01-02
//! Days in range: 2
//! Number of days with zero conversations: 0
//! Total messages sent by Mentor: 2
//! Total messages sent by Student: 1
//! Average messages sent by Mentor per day: 1.00
//! Average messages sent by Student per day: 0.50
//! Minimum messages by Mentor in a day: 1
//! Maximum messages by Mentor in a day: 1
//! Minimum messages by Student in a day: 0
//! Maximum messages by Student in a day: 1
//! Most messages sent by: Mentor
//! ```
//!
//! Per-category lines follow the report's category priority order, so
//! `Unknown` lines appear only when the report includes `Unknown`.

use std::fmt::Write;

use crate::core::summary::SummaryReport;

/// Text shown when the analysis produced no records.
pub const NO_DATA: &str = "No data available";

/// Renders the report as text, one metric per line.
pub fn render(report: &SummaryReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

/// Rendering of the "no data" result.
pub fn render_no_data() -> String {
    format!("{NO_DATA}\n")
}

fn write_report(out: &mut String, report: &SummaryReport) -> std::fmt::Result {
    let categories = report.reported_categories();

    writeln!(out, "Chat Start Date: {}", report.date_range.start().format("%Y-%m-%d"))?;
    writeln!(out, "Chat End Date: {}", report.date_range.end().format("%Y-%m-%d"))?;
    writeln!(out, "Days in range: {}", report.days)?;
    writeln!(
        out,
        "Number of days with zero conversations: {}",
        report.zero_activity_days
    )?;

    for category in categories {
        writeln!(out, "Total messages sent by {category}: {}", report.total(*category))?;
    }
    for category in categories {
        let average = report.stats(*category).map_or(0.0, |s| s.average);
        writeln!(out, "Average messages sent by {category} per day: {average:.2}")?;
    }
    for category in categories {
        let (min, max) = report.stats(*category).map_or((0, 0), |s| (s.min, s.max));
        writeln!(out, "Minimum messages by {category} in a day: {min}")?;
        writeln!(out, "Maximum messages by {category} in a day: {max}")?;
    }

    match report.most_active_category {
        Some(category) => writeln!(out, "Most messages sent by: {category}"),
        None => writeln!(out, "Most messages sent by: none"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::category::Category;
    use crate::config::UnknownPolicy;
    use crate::core::aggregate::DateRange;
    use crate::core::summary::CategoryStats;

    fn stats(total: u64, average: f64, min: u64, max: u64) -> CategoryStats {
        CategoryStats { total, average, min, max }
    }

    fn sample(policy: UnknownPolicy) -> SummaryReport {
        let mut categories = BTreeMap::new();
        categories.insert(Category::Mentor, stats(2, 1.0, 1, 1));
        categories.insert(Category::Student, stats(1, 0.5, 0, 1));
        if policy == UnknownPolicy::Include {
            categories.insert(Category::Unknown, stats(0, 0.0, 0, 0));
        }
        SummaryReport {
            date_range: DateRange::new(
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            )
            .unwrap(),
            days: 2,
            categories,
            zero_activity_days: 0,
            most_active_category: Some(Category::Mentor),
            unknown_policy: policy,
        }
    }

    #[test]
    fn test_render_fixed_order() {
        let text = render(&sample(UnknownPolicy::Exclude));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Chat Start Date: 2023-01-01",
                "Chat End Date: 2023-01-02",
                "Days in range: 2",
                "Number of days with zero conversations: 0",
                "Total messages sent by Mentor: 2",
                "Total messages sent by Student: 1",
                "Average messages sent by Mentor per day: 1.00",
                "Average messages sent by Student per day: 0.50",
                "Minimum messages by Mentor in a day: 1",
                "Maximum messages by Mentor in a day: 1",
                "Minimum messages by Student in a day: 0",
                "Maximum messages by Student in a day: 1",
                "Most messages sent by: Mentor",
            ]
        );
    }

    #[test]
    fn test_render_includes_unknown_lines() {
        let text = render(&sample(UnknownPolicy::Include));
        assert!(text.contains("Total messages sent by Unknown: 0\n"));
        assert!(text.contains("Average messages sent by Unknown per day: 0.00\n"));
    }

    #[test]
    fn test_render_two_decimal_averages() {
        let mut report = sample(UnknownPolicy::Exclude);
        report.categories.insert(Category::Mentor, stats(2, 2.0 / 3.0, 0, 1));
        let text = render(&report);
        assert!(text.contains("Average messages sent by Mentor per day: 0.67\n"));
    }

    #[test]
    fn test_render_without_most_active() {
        let mut report = sample(UnknownPolicy::Exclude);
        report.most_active_category = None;
        assert!(render(&report).ends_with("Most messages sent by: none\n"));
    }

    #[test]
    fn test_render_no_data() {
        assert_eq!(render_no_data(), "No data available\n");
    }
}
