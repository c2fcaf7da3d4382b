//! Edge case tests for chatpulse
//!
//! These tests cover boundary conditions of real exports: odd header
//! spellings, empty or noisy input, unusual senders and calendar corners.

use chatpulse::anomaly::{AnomalyKind, count_kind};
use chatpulse::category::classify_sender;
use chatpulse::core::aggregate;
use chatpulse::parser::parse;
use chatpulse::pipeline::analyze;
use chatpulse::{Category, MessageRecord};
use chrono::{NaiveDate, NaiveDateTime};

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn single(line: &str) -> MessageRecord {
    let output = parse(line);
    assert_eq!(output.records.len(), 1, "expected one record from {line:?}");
    output.records.into_iter().next().unwrap()
}

// =========================================================================
// Empty and noisy input
// =========================================================================

#[test]
fn test_empty_input() {
    let output = parse("");
    assert!(output.records.is_empty());
    assert!(output.anomalies.is_empty());

    let analysis = analyze("");
    assert!(analysis.is_empty());
    assert_eq!(count_kind(&analysis.anomalies, AnomalyKind::EmptyInput), 1);
}

#[test]
fn test_blank_lines_only() {
    let output = parse("\n\n   \n\t\n");
    assert!(output.records.is_empty());
    assert!(output.anomalies.is_empty());
}

#[test]
fn test_blank_lines_inside_message_are_skipped() {
    let record = single("1/1/23, 10:00 am - Alice: first\n\n\nsecond");
    assert_eq!(record.body, "first second");
}

#[test]
fn test_only_garbage() {
    let analysis = analyze("no header here\nnor here");
    assert!(analysis.records.is_empty());
    assert_eq!(
        count_kind(&analysis.anomalies, AnomalyKind::OrphanContinuationLine),
        2
    );
    assert_eq!(analysis.render(), "No data available\n");
}

// =========================================================================
// Header spellings
// =========================================================================

#[test]
fn test_uppercase_and_unspaced_markers() {
    assert_eq!(single("1/1/23, 10:00 AM - Alice: hi").timestamp, ts(2023, 1, 1, 10, 0));
    assert_eq!(single("1/1/23, 10:00pm - Alice: hi").timestamp, ts(2023, 1, 1, 22, 0));
    assert_eq!(single("1/1/23, 12:15 am - Alice: hi").timestamp, ts(2023, 1, 1, 0, 15));
}

#[test]
fn test_narrow_no_break_space_before_marker() {
    let record = single("1/1/23, 9:05\u{202f}pm - Alice: hi");
    assert_eq!(record.timestamp, ts(2023, 1, 1, 21, 5));
}

#[test]
fn test_en_dash_separator() {
    let record = single("1/1/23, 9:05 am \u{2013} Alice: hi");
    assert_eq!(record.sender_raw, "Alice");
}

#[test]
fn test_four_digit_year_and_24h_clock() {
    let record = single("15/01/2024, 21:05 - Alice: hi");
    assert_eq!(record.timestamp, ts(2024, 1, 15, 21, 5));
}

#[test]
fn test_day_first_dates() {
    let record = single("3/4/23, 10:00 am - Alice: hi");
    assert_eq!(record.date(), NaiveDate::from_ymd_opt(2023, 4, 3).unwrap());
}

#[test]
fn test_colon_inside_message_text() {
    let record = single("1/1/23, 10:00 am - Alice: meet at 10:30: room 4");
    assert_eq!(record.sender_raw, "Alice");
    assert_eq!(record.body, "meet at 10:30: room 4");
}

#[test]
fn test_header_without_text_takes_continuation() {
    let record = single("1/1/23, 10:00 am - Alice:\nactual text");
    assert_eq!(record.body, "actual text");
}

#[test]
fn test_header_without_any_text_is_dropped() {
    let output = parse("1/1/23, 10:00 am - Alice:\n1/1/23, 10:01 am - Alice: next");
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].body, "next");
    assert_eq!(count_kind(&output.anomalies, AnomalyKind::EmptyBody), 1);
}

#[test]
fn test_system_notice_is_malformed_header() {
    let output = parse(
        "1/1/23, 10:00 am - Alice: hi\n1/1/23, 10:01 am - Alice changed the group description",
    );
    assert_eq!(output.records.len(), 1);
    assert_eq!(count_kind(&output.anomalies, AnomalyKind::UnparsableHeaderLine), 1);
    assert!(output.records[0].body.starts_with("hi 1/1/23"));
}

// =========================================================================
// Calendar corners
// =========================================================================

#[test]
fn test_leap_day() {
    assert_eq!(single("29/2/24, 10:00 am - Alice: leap").date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

    let output = parse("29/2/23, 10:00 am - Alice: not a leap year");
    assert!(output.records.is_empty());
    assert_eq!(count_kind(&output.anomalies, AnomalyKind::InvalidTimestamp), 1);
}

#[test]
fn test_year_boundary_range() {
    let output = parse("31/12/22, 11:59 pm - Alice: bye 2022\n1/1/23, 12:01 am - Alice: hello 2023");
    let series = aggregate(&output.records).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.counts(Category::Mentor), &[1, 1]);
}

#[test]
fn test_out_of_order_headers() {
    let output = parse("5/1/23, 10:00 am - Alice: later\n1/1/23, 10:00 am - Alice: earlier");
    assert_eq!(output.records[0].body, "later");

    let series = aggregate(&output.records).unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series.counts(Category::Mentor), &[1, 0, 0, 0, 1]);
}

#[test]
fn test_single_day_summary() {
    let analysis = analyze("1/1/23, 10:00 am - Alice: a\n1/1/23, 11:00 am - Alice: b");
    let report = analysis.report.unwrap();
    assert_eq!(report.days, 1);
    assert_eq!(report.zero_activity_days, 0);
    let mentor = report.stats(Category::Mentor).unwrap();
    assert!((mentor.average - 2.0).abs() < f64::EPSILON);
    assert_eq!((mentor.min, mentor.max), (2, 2));
}

// =========================================================================
// Sender classification
// =========================================================================

#[test]
fn test_sender_categories() {
    assert_eq!(classify_sender("Alice"), Category::Mentor);
    assert_eq!(classify_sender("Mary-Jane O'Neil"), Category::Mentor);
    assert_eq!(classify_sender("Dr. Rao"), Category::Mentor);
    assert_eq!(classify_sender("+15551234567"), Category::Student);
    assert_eq!(classify_sender("+44 7700 900123"), Category::Student);
    assert_eq!(classify_sender("42"), Category::Student);
    assert_eq!(classify_sender("Student 7"), Category::Student);
    assert_eq!(classify_sender("🦄"), Category::Unknown);
    assert_eq!(classify_sender("Alice 🎉"), Category::Unknown);
    assert_eq!(classify_sender(""), Category::Unknown);
}

#[test]
fn test_non_latin_names_are_mentors() {
    assert_eq!(classify_sender("Иван"), Category::Mentor);
    assert_eq!(classify_sender("村上"), Category::Mentor);
    assert_eq!(classify_sender("محمد"), Category::Mentor);
}

#[test]
fn test_names_with_combining_marks_through_parser() {
    let record = single("1/1/23, 10:00 am - प्रिया: namaste");
    assert_eq!(record.sender_raw, "प्रिया");
    assert_eq!(record.category, Category::Mentor);

    let record = single("1/1/23, 10:05 am - Jose\u{301}: hola");
    assert_eq!(record.category, Category::Mentor);
}

#[test]
fn test_phone_number_sender_through_parser() {
    let record = single("1/1/23, 10:00 am - +91 98765 43210: hello");
    assert_eq!(record.sender_raw, "+91 98765 43210");
    assert_eq!(record.category, Category::Student);
}
