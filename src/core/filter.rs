//! Filter message records by date window, category and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering record collections before aggregation.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Category | [`with_category`](FilterConfig::with_category) | Records of the listed categories |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Records from a specific sender |
//!
//! # Examples
//!
//! ```
//! use chatpulse::core::filter::{FilterConfig, apply_filters};
//! use chatpulse::{Category, MessageRecord};
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatpulse::Result<()> {
//! let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let records = vec![
//!     MessageRecord::new(day(1), "Alice", Category::Mentor, "Old"),
//!     MessageRecord::new(day(15), "Alice", Category::Mentor, "New"),
//! ];
//!
//! let config = FilterConfig::new().with_date_from("2024-06-10")?;
//! let filtered = apply_filters(records, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Date bounds are inclusive whole days
//! - Sender matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::MessageRecord;
use crate::category::Category;
use crate::core::aggregate::DateRange;
use crate::error::{ChatpulseError, Result};

/// Configuration for filtering records.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Include only records on or after this day.
    pub after: Option<NaiveDate>,

    /// Include only records on or before this day.
    pub before: Option<NaiveDate>,

    /// Include only records of these categories.
    pub categories: Option<Vec<Category>>,

    /// Include only records from this sender (case-insensitive).
    pub sender: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_day(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.before = Some(parse_day(date_str)?);
        Ok(self)
    }

    /// Sets the start day directly.
    #[must_use]
    pub fn with_after(mut self, day: NaiveDate) -> Self {
        self.after = Some(day);
        self
    }

    /// Sets the end day directly.
    #[must_use]
    pub fn with_before(mut self, day: NaiveDate) -> Self {
        self.before = Some(day);
        self
    }

    /// Adds a category to the allow-list.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        let categories = self.categories.get_or_insert_with(Vec::new);
        if !categories.contains(&category) {
            categories.push(category);
        }
        self
    }

    /// Sets the sender filter.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.categories.is_some() || self.sender.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns the explicit analysis window when both bounds are set.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidRange`] if `after` is later than `before`.
    pub fn window(&self) -> Result<Option<DateRange>> {
        match (self.after, self.before) {
            (Some(start), Some(end)) => DateRange::new(start, end).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns `true` if the record passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        let day = record.date();

        if self.after.is_some_and(|after| day < after) {
            return false;
        }
        if self.before.is_some_and(|before| day > before) {
            return false;
        }
        if let Some(ref categories) = self.categories {
            if !categories.contains(&record.category) {
                return false;
            }
        }
        if let Some(ref sender) = self.sender {
            if !record.sender_raw.eq_ignore_ascii_case(sender) {
                return false;
            }
        }

        true
    }
}

/// Parse a date string in YYYY-MM-DD format.
fn parse_day(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatpulseError::invalid_date(date_str))
}

/// Filters records based on the provided configuration.
///
/// Returns the records matching all active filters, in their original order.
/// If no filters are active, returns the input unchanged.
pub fn apply_filters(records: Vec<MessageRecord>, config: &FilterConfig) -> Vec<MessageRecord> {
    if !config.is_active() {
        return records;
    }

    records.into_iter().filter(|r| config.matches(r)).collect()
}
