//! Daily aggregation of message records.
//!
//! Records arrive with irregular timestamps in any order. The aggregator
//! resamples them into one count per calendar day per [`Category`], over a
//! contiguous [`DateRange`]: every day between the first and last message is
//! present, and days without messages carry explicit zeros.
//!
//! ```
//! use chatpulse::core::aggregate::aggregate;
//! use chatpulse::parser::parse;
//! use chatpulse::Category;
//!
//! let output = parse("1/1/23, 9:00 am - Alice: hi\n3/1/23, 9:00 am - Alice: back");
//! let series = aggregate(&output.records).expect("records present");
//!
//! assert_eq!(series.len(), 3);
//! assert_eq!(series.counts(Category::Mentor), &[1, 0, 1]);
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::MessageRecord;
use crate::category::Category;
use crate::error::{ChatpulseError, Result};

/// Inclusive range of calendar days; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ChatpulseError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ChatpulseError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the range spanned by the records' dates, or `None` if empty.
    pub fn of_records(records: &[MessageRecord]) -> Option<Self> {
        let start = records.iter().map(MessageRecord::date).min()?;
        let end = records.iter().map(MessageRecord::date).max()?;
        Some(Self { start, end })
    }

    /// First day (inclusive).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range, both ends included.
    pub fn days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Returns `true` if `day` lies within the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Zero-based position of `day` in the range.
    pub fn index_of(&self, day: NaiveDate) -> Option<usize> {
        self.contains(day)
            .then(|| (day - self.start).num_days() as usize)
    }

    /// Iterates over every day of the range in order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.days())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Dense per-day message counts for every category.
///
/// All count sequences have [`len`](Self::len) entries, aligned index by
/// index with [`DateRange::iter`]. Only the aggregators build a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    range: DateRange,
    counts: BTreeMap<Category, Vec<u64>>,
}

impl DailySeries {
    /// Creates an all-zero series covering `range`.
    pub fn zeroed(range: DateRange) -> Self {
        let days = range.days();
        let counts = Category::ALL
            .iter()
            .map(|&category| (category, vec![0; days]))
            .collect();
        Self { range, counts }
    }

    /// The covered date range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Number of days in the series.
    pub fn len(&self) -> usize {
        self.range.days()
    }

    /// Always `false`: a series covers at least one day.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Per-day counts for one category.
    pub fn counts(&self, category: Category) -> &[u64] {
        self.counts.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the days of the series.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.range.iter()
    }

    /// Count for one category on one day; zero outside the range.
    pub fn count_on(&self, category: Category, day: NaiveDate) -> u64 {
        self.range
            .index_of(day)
            .and_then(|i| self.counts(category).get(i).copied())
            .unwrap_or(0)
    }

    /// Sum over `categories` for the day at `index`.
    pub fn day_total(&self, index: usize, categories: &[Category]) -> u64 {
        categories
            .iter()
            .map(|&c| self.counts(c).get(index).copied().unwrap_or(0))
            .sum()
    }

    /// Iterates over `(day, [mentor, student, unknown])` rows.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, [u64; 3])> + '_ {
        self.dates().enumerate().map(|(i, day)| {
            let row = Category::ALL.map(|c| self.counts(c).get(i).copied().unwrap_or(0));
            (day, row)
        })
    }

    /// Adds one message to the bucket of `category` on `day`.
    ///
    /// Returns `false` (and counts nothing) if `day` is outside the range.
    fn record(&mut self, category: Category, day: NaiveDate) -> bool {
        let Some(index) = self.range.index_of(day) else {
            return false;
        };
        if let Some(bucket) = self
            .counts
            .get_mut(&category)
            .and_then(|days| days.get_mut(index))
        {
            *bucket += 1;
        }
        true
    }
}

/// Buckets records into a dense daily series spanning their own dates.
///
/// Returns `None` ("no data") when there are no records.
pub fn aggregate(records: &[MessageRecord]) -> Option<DailySeries> {
    let range = DateRange::of_records(records)?;
    Some(aggregate_over(records, range))
}

/// Buckets records into a dense daily series over an explicit window.
///
/// Records dated outside `range` are ignored; the window's leading and
/// trailing days are kept even when they have no messages.
pub fn aggregate_over(records: &[MessageRecord], range: DateRange) -> DailySeries {
    let mut series = DailySeries::zeroed(range);
    let mut outside = 0usize;

    for record in records {
        if !series.record(record.category, record.date()) {
            outside += 1;
        }
    }

    tracing::debug!(
        days = series.len(),
        records = records.len() - outside,
        outside,
        "aggregated daily series"
    );

    series
}
