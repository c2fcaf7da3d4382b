//! Summary statistics over a daily series.
//!
//! [`summarize`] turns a [`DailySeries`] into a [`SummaryReport`]: per
//! category totals, per-day averages over the full calendar range, daily
//! minimum and maximum, the number of days without any message, and the
//! most active category.
//!
//! Which categories take part is decided by the
//! [`UnknownPolicy`](crate::config::UnknownPolicy) of the [`SummaryConfig`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::config::{SummaryConfig, UnknownPolicy};
use crate::core::aggregate::{DailySeries, DateRange};

/// Statistics for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Sum of the daily counts.
    pub total: u64,
    /// `total` divided by the number of days in range.
    pub average: f64,
    /// Smallest daily count.
    pub min: u64,
    /// Largest daily count.
    pub max: u64,
}

impl CategoryStats {
    fn from_counts(counts: &[u64]) -> Self {
        let total: u64 = counts.iter().sum();
        let days = counts.len().max(1);
        Self {
            total,
            average: total as f64 / days as f64,
            min: counts.iter().copied().min().unwrap_or(0),
            max: counts.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Immutable snapshot of the derived metrics of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Inclusive span of the analysed days.
    pub date_range: DateRange,
    /// Number of calendar days in `date_range`.
    pub days: usize,
    /// Per-category statistics for the reported categories.
    pub categories: BTreeMap<Category, CategoryStats>,
    /// Days on which the reported categories sent nothing at all.
    pub zero_activity_days: usize,
    /// Category with the highest total, `None` if nobody sent anything.
    pub most_active_category: Option<Category>,
    /// Policy the report was computed under.
    pub unknown_policy: UnknownPolicy,
}

impl SummaryReport {
    /// Statistics for `category`, if it was reported.
    pub fn stats(&self, category: Category) -> Option<&CategoryStats> {
        self.categories.get(&category)
    }

    /// Total for `category`; zero if it was not reported.
    pub fn total(&self, category: Category) -> u64 {
        self.stats(category).map_or(0, |s| s.total)
    }

    /// Sum of all reported totals.
    pub fn total_messages(&self) -> u64 {
        self.categories.values().map(|s| s.total).sum()
    }

    /// Reported categories in priority order.
    pub fn reported_categories(&self) -> &'static [Category] {
        self.unknown_policy.categories()
    }
}

/// Computes the summary report for a daily series.
pub fn summarize(series: &DailySeries, config: &SummaryConfig) -> SummaryReport {
    let reported = config.unknown_policy.categories();

    let categories: BTreeMap<Category, CategoryStats> = reported
        .iter()
        .map(|&category| (category, CategoryStats::from_counts(series.counts(category))))
        .collect();

    let zero_activity_days = (0..series.len())
        .filter(|&i| series.day_total(i, reported) == 0)
        .count();

    let most_active_category = most_active(reported, &categories);

    tracing::debug!(
        days = series.len(),
        zero_activity_days,
        most_active = ?most_active_category,
        "computed summary"
    );

    SummaryReport {
        date_range: series.range(),
        days: series.len(),
        categories,
        zero_activity_days,
        most_active_category,
        unknown_policy: config.unknown_policy,
    }
}

/// Highest total wins; on equal totals the earlier category in `priority`
/// wins. Nobody wins when every total is zero.
fn most_active(
    priority: &[Category],
    stats: &BTreeMap<Category, CategoryStats>,
) -> Option<Category> {
    let mut best: Option<(Category, u64)> = None;
    for &category in priority {
        let total = stats.get(&category).map_or(0, |s| s.total);
        if total > best.map_or(0, |(_, t)| t) {
            best = Some((category, total));
        }
    }
    best.map(|(category, _)| category)
}
