//! Aggregate statistics types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Earliest and latest entry dates; both `None` iff there are no entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DateSpan {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

/// Immutable statistics snapshot derived from one entry set.
///
/// Hour values are unrounded; renderers choose display precision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total_hours: f64,
    pub total_entries: u64,
    pub average_hours: f64,
    /// Distinct organization count
    pub organizations: u64,
    /// Distinct non-empty category count
    pub categories: u64,
    pub date_range: DateSpan,
    pub hours_by_org: BTreeMap<String, f64>,
    /// Entries without a category are left out
    pub hours_by_category: BTreeMap<String, f64>,
    /// Keyed by `YYYY-MM`
    pub entries_by_month: BTreeMap<String, u64>,
}

impl ReportStats {
    /// Organizations ranked by descending hours
    pub fn ranked_orgs(&self) -> Vec<(&str, f64)> {
        rank_by_hours(&self.hours_by_org)
    }

    /// Categories ranked by descending hours
    pub fn ranked_categories(&self) -> Vec<(&str, f64)> {
        rank_by_hours(&self.hours_by_category)
    }

    pub fn has_categories(&self) -> bool {
        !self.hours_by_category.is_empty()
    }
}

/// Sort buckets by descending hours. Ties keep name order.
pub fn rank_by_hours(buckets: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = buckets.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Headline numbers for the dashboard view
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_hours: f64,
    pub total_entries: u64,
    pub organizations: u64,
    pub this_month_hours: f64,
    /// Top organizations by hours, descending
    pub top_organizations: Vec<(String, f64)>,
}

/// Hours summed over one period bucket (day, week or month)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodHours {
    pub period: String,
    pub hours: f64,
}
