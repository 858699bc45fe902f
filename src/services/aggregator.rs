//! Aggregator service for computing volunteer-hour statistics

use crate::services::clock::Clock;
use crate::types::{
    rank_by_hours, DashboardSummary, DateSpan, Entry, PeriodHours, ReportStats, UNCATEGORIZED,
};
use chrono::{Datelike, Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Bucket size for period grouping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    /// Keyed by the Monday that starts the week
    Week,
    Month,
}

/// Number of organizations shown on the dashboard
pub const DASHBOARD_TOP_ORGS: usize = 10;

/// Aggregator for computing volunteer-hour statistics
pub struct Aggregator;

impl Aggregator {
    /// Full statistics snapshot for a report. Pure; no rounding.
    pub fn statistics(entries: &[Entry]) -> ReportStats {
        if entries.is_empty() {
            return ReportStats::default();
        }

        let mut stats = ReportStats::default();
        let mut categories: HashSet<&str> = HashSet::new();
        let mut earliest: Option<NaiveDate> = None;
        let mut latest: Option<NaiveDate> = None;

        for entry in entries {
            stats.total_hours += entry.hours;

            *stats
                .hours_by_org
                .entry(entry.organization.clone())
                .or_insert(0.0) += entry.hours;

            if let Some(category) = entry.category_label() {
                categories.insert(category);
                *stats
                    .hours_by_category
                    .entry(category.to_string())
                    .or_insert(0.0) += entry.hours;
            }

            *stats.entries_by_month.entry(month_key(entry.date)).or_insert(0) += 1;

            earliest = Some(earliest.map_or(entry.date, |d| d.min(entry.date)));
            latest = Some(latest.map_or(entry.date, |d| d.max(entry.date)));
        }

        stats.total_entries = entries.len() as u64;
        stats.average_hours = stats.total_hours / entries.len() as f64;
        stats.organizations = stats.hours_by_org.len() as u64;
        stats.categories = categories.len() as u64;
        stats.date_range = DateSpan { earliest, latest };
        stats
    }

    /// Headline numbers: totals, hours this calendar month, top organizations.
    pub fn dashboard(entries: &[Entry], clock: &dyn Clock, top_n: usize) -> DashboardSummary {
        let today = clock.today();
        let stats = Self::statistics(entries);

        let this_month_hours = entries
            .iter()
            .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
            .map(|e| e.hours)
            .sum();

        let top_organizations = rank_by_hours(&stats.hours_by_org)
            .into_iter()
            .take(top_n)
            .map(|(org, hours)| (org.to_string(), hours))
            .collect();

        DashboardSummary {
            total_hours: stats.total_hours,
            total_entries: stats.total_entries,
            organizations: stats.organizations,
            this_month_hours,
            top_organizations,
        }
    }

    /// Hours per day, week or month, sorted by period ascending
    pub fn by_period(entries: &[Entry], granularity: Granularity) -> Vec<PeriodHours> {
        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();

        for entry in entries {
            let key = match granularity {
                Granularity::Day => entry.date.format("%Y-%m-%d").to_string(),
                Granularity::Week => week_start(entry.date).format("%Y-%m-%d").to_string(),
                Granularity::Month => month_key(entry.date),
            };
            *buckets.entry(key).or_insert(0.0) += entry.hours;
        }

        buckets
            .into_iter()
            .map(|(period, hours)| PeriodHours { period, hours })
            .collect()
    }

    /// Hours per category with empty categories bucketed as "Uncategorized"
    pub fn by_category_view(entries: &[Entry]) -> BTreeMap<String, f64> {
        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
        for entry in entries {
            let label = entry.category_label().unwrap_or(UNCATEGORIZED);
            *buckets.entry(label.to_string()).or_insert(0.0) += entry.hours;
        }
        buckets
    }
}

/// `YYYY-MM`, zero-padded
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
