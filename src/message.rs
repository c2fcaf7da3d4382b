//! Reconstructed chat messages.
//!
//! A [`MessageRecord`] is one message rebuilt from a header line plus any
//! continuation lines that followed it. Records are only produced for
//! messages whose timestamp parsed and whose body is non-empty.
//!
//! ```
//! use chatpulse::{MessageRecord, Category};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let msg = MessageRecord::new(ts, "Alice", Category::Mentor, "Hello world");
//!
//! assert_eq!(msg.date(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
//! assert_eq!(msg.body(), "Hello world");
//! ```

use std::borrow::Borrow;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// One reconstructed message.
///
/// Timestamps are naive: exports carry the exporting phone's local time
/// with no offset, and daily bucketing happens in that same local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was sent (exporter's local time).
    pub timestamp: NaiveDateTime,

    /// Sender token exactly as it appeared in the header (trimmed).
    pub sender_raw: String,

    /// Category assigned by the participant classifier.
    pub category: Category,

    /// Message text; continuation lines are joined with single spaces.
    pub body: String,
}

impl MessageRecord {
    /// Creates a record from its parts.
    pub fn new(
        timestamp: NaiveDateTime,
        sender_raw: impl Into<String>,
        category: Category,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender_raw: sender_raw.into(),
            category,
            body: body.into(),
        }
    }

    /// Returns the calendar day the message belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the raw sender token.
    pub fn sender(&self) -> &str {
        &self.sender_raw
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Stable-sorts records by timestamp.
///
/// Messages sharing a timestamp keep their order of appearance. Works on
/// owned records and on borrowed views alike.
pub fn sort_chronologically<R: Borrow<MessageRecord>>(records: &mut [R]) {
    records.sort_by_key(|r| r.borrow().timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_sort_is_stable() {
        let mut records = vec![
            MessageRecord::new(at(2, 9), "Alice", Category::Mentor, "late"),
            MessageRecord::new(at(1, 9), "Bob", Category::Mentor, "first"),
            MessageRecord::new(at(1, 9), "123", Category::Student, "second"),
        ];

        sort_chronologically(&mut records);

        let bodies: Vec<&str> = records.iter().map(MessageRecord::body).collect();
        assert_eq!(bodies, ["first", "second", "late"]);
    }

    #[test]
    fn test_sort_borrowed_records() {
        let records = [
            MessageRecord::new(at(3, 8), "Alice", Category::Mentor, "third"),
            MessageRecord::new(at(1, 8), "Bob", Category::Mentor, "first"),
            MessageRecord::new(at(2, 8), "123", Category::Student, "second"),
        ];
        let mut view: Vec<&MessageRecord> = records.iter().collect();

        sort_chronologically(&mut view);

        let bodies: Vec<&str> = view.iter().map(|r| r.body()).collect();
        assert_eq!(bodies, ["first", "second", "third"]);
        assert_eq!(records[0].body(), "third");
    }

    #[test]
    fn test_record_serialization() {
        let msg = MessageRecord::new(at(5, 14), "+15551234567", Category::Student, "Hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""category":"student""#));
        assert!(json.contains("2024-03-05T14:00:00"));

        let back: MessageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
