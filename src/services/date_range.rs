//! Date-range descriptors and their resolution against a clock

use std::sync::OnceLock;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::lenient;
use crate::types::{ReportError, Result};

/// Unit for "last N units" ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TimeUnit {
    Hours,
    #[default]
    Days,
    Weeks,
    Months,
    Years,
}

impl From<String> for TimeUnit {
    /// Unrecognised units fall back to days.
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hour" | "hours" => TimeUnit::Hours,
            "week" | "weeks" => TimeUnit::Weeks,
            "month" | "months" => TimeUnit::Months,
            "year" | "years" => TimeUnit::Years,
            _ => TimeUnit::Days,
        }
    }
}

impl From<&str> for TimeUnit {
    fn from(value: &str) -> Self {
        TimeUnit::from(value.to_string())
    }
}

/// Symbolic date window, resolved against the current clock at filter time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DateRange {
    #[default]
    All,
    #[serde(alias = "ytd")]
    YearToDate,
    Custom {
        #[serde(default, rename = "startDate", skip_serializing_if = "Option::is_none")]
        start: Option<String>,
        #[serde(default, rename = "endDate", skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
    #[serde(alias = "last-n-units")]
    Last {
        #[serde(
            default = "lenient::default_count",
            deserialize_with = "lenient::count"
        )]
        value: u32,
        #[serde(default, deserialize_with = "lenient::time_unit")]
        unit: TimeUnit,
    },
}

/// Concrete window; `None` on either side means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateBounds {
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Entry dates are compared at local midnight.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let at = date.and_time(NaiveTime::MIN);
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }
}

impl DateRange {
    /// Resolve to concrete bounds.
    ///
    /// Fails with `InvalidDate` only for a custom bound that is not `YYYY-MM-DD`.
    pub fn resolve(&self, clock: &dyn Clock) -> Result<DateBounds> {
        let now = clock.now();
        let end_of_today = end_of_day(now.date());

        let bounds = match self {
            DateRange::All => DateBounds::default(),
            DateRange::YearToDate => DateBounds {
                start: NaiveDate::from_ymd_opt(now.year(), 1, 1)
                    .map(|d| d.and_time(NaiveTime::MIN)),
                end: Some(end_of_today),
            },
            DateRange::Custom { start, end } => DateBounds {
                start: parse_bound(start.as_deref())?,
                end: parse_bound(end.as_deref())?.or(Some(end_of_today)),
            },
            DateRange::Last { value, unit } => DateBounds {
                start: subtract(now, (*value).max(1), *unit),
                end: Some(end_of_today),
            },
        };
        Ok(bounds)
    }
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

/// Calendar-aware: months and years subtract calendar components, clamping
/// to the last valid day of the target month.
fn subtract(now: NaiveDateTime, amount: u32, unit: TimeUnit) -> Option<NaiveDateTime> {
    let amount_i = i64::from(amount);
    match unit {
        TimeUnit::Hours => now.checked_sub_signed(Duration::hours(amount_i)),
        TimeUnit::Days => now.checked_sub_signed(Duration::days(amount_i)),
        TimeUnit::Weeks => now.checked_sub_signed(Duration::days(amount_i * 7)),
        TimeUnit::Months => now.checked_sub_months(Months::new(amount)),
        TimeUnit::Years => amount
            .checked_mul(12)
            .and_then(|months| now.checked_sub_months(Months::new(months))),
    }
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"))
}

/// Strict `YYYY-MM-DD` parse for user-supplied bounds.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    if !date_pattern().is_match(text) {
        return Err(ReportError::InvalidDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDate(text.to_string()))
}

fn parse_bound(text: Option<&str>) -> Result<Option<NaiveDateTime>> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(t) => parse_date(t).map(|d| Some(d.and_time(NaiveTime::MIN))),
    }
}
