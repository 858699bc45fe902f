//! Entry filtering for reports and the entry list view

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::clock::Clock;
use super::date_range::{DateBounds, DateRange};
use super::lenient;
use crate::types::Entry;

/// Sentinel meaning "do not filter on this field"
pub const ALL: &str = "all";

/// Report filter criteria. Every field is optional; set fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Case-insensitive substring of the activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    /// Case-insensitive substring of the description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_hours: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_hours: Option<f64>,
}

impl FilterCriteria {
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_volunteer(mut self, volunteer: impl Into<String>) -> Self {
        self.volunteer = Some(volunteer.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_hours_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_hours = min;
        self.max_hours = max;
        self
    }
}

/// Criteria with the date range resolved and search terms lowercased
struct Matcher<'a> {
    bounds: DateBounds,
    volunteer: Option<&'a str>,
    organization: Option<&'a str>,
    category: Option<&'a str>,
    activity: Option<String>,
    description: Option<String>,
    min_hours: Option<f64>,
    max_hours: Option<f64>,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria, bounds: DateBounds) -> Self {
        Self {
            bounds,
            volunteer: exact_term(criteria.volunteer.as_deref()),
            organization: exact_term(criteria.organization.as_deref()),
            category: exact_term(criteria.category.as_deref()),
            activity: search_term(criteria.activity.as_deref()),
            description: search_term(criteria.description.as_deref()),
            min_hours: criteria.min_hours,
            max_hours: criteria.max_hours,
        }
    }

    fn matches(&self, entry: &Entry) -> bool {
        if !self.bounds.contains(entry.date) {
            return false;
        }
        if self
            .volunteer
            .is_some_and(|v| entry.effective_volunteer() != v)
        {
            return false;
        }
        if self.organization.is_some_and(|o| entry.organization != o) {
            return false;
        }
        if self
            .category
            .is_some_and(|c| entry.category.as_deref() != Some(c))
        {
            return false;
        }
        if let Some(term) = &self.activity {
            if !entry.activity.to_lowercase().contains(term.as_str()) {
                return false;
            }
        }
        if let Some(term) = &self.description {
            let hit = entry
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(term.as_str()));
            if !hit {
                return false;
            }
        }
        if self.min_hours.is_some_and(|min| entry.hours < min) {
            return false;
        }
        if self.max_hours.is_some_and(|max| entry.hours > max) {
            return false;
        }
        true
    }
}

fn exact_term(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ALL)
}

fn search_term(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_lowercase)
}

/// Keep entries matching every active predicate, in their original order.
///
/// A custom date range that fails to parse excludes every entry.
pub fn filter_entries(
    entries: &[Entry],
    criteria: &FilterCriteria,
    clock: &dyn Clock,
) -> Vec<Entry> {
    let bounds = match criteria.date_range.as_ref().map(|r| r.resolve(clock)) {
        None => DateBounds::default(),
        Some(Ok(bounds)) => bounds,
        Some(Err(err)) => {
            warn!(%err, "unusable date range, no entries match");
            return Vec::new();
        }
    };

    let matcher = Matcher::new(criteria, bounds);
    let filtered: Vec<Entry> = entries
        .iter()
        .filter(|e| matcher.matches(e))
        .cloned()
        .collect();

    debug!(total = entries.len(), kept = filtered.len(), "filtered entries");
    filtered
}

/// Distinct values for building filter pickers, each sorted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub volunteers: Vec<String>,
    pub organizations: Vec<String>,
    pub categories: Vec<String>,
}

impl FilterOptions {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut volunteers = BTreeSet::new();
        let mut organizations = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for entry in entries {
            volunteers.insert(entry.effective_volunteer());
            organizations.insert(entry.organization.as_str());
            if let Some(category) = entry.category_label() {
                categories.insert(category);
            }
        }

        Self {
            volunteers: volunteers.into_iter().map(String::from).collect(),
            organizations: organizations.into_iter().map(String::from).collect(),
            categories: categories.into_iter().map(String::from).collect(),
        }
    }
}

/// Ordering for the entry list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    HoursDesc,
    HoursAsc,
}

/// Entry list view query: quick search across text fields plus exact filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryQuery {
    pub search: Option<String>,
    pub organization: Option<String>,
    pub category: Option<String>,
    pub sort: SortOrder,
}

/// Apply a list-view query. Sorting is stable.
pub fn list_entries<'a>(entries: &'a [Entry], query: &EntryQuery) -> Vec<&'a Entry> {
    let search = search_term(query.search.as_deref());
    let organization = exact_term(query.organization.as_deref());
    let category = exact_term(query.category.as_deref());

    let mut listed: Vec<&Entry> = entries
        .iter()
        .filter(|e| search.as_deref().map_or(true, |term| quick_search_hit(e, term)))
        .filter(|e| organization.map_or(true, |o| e.organization == o))
        .filter(|e| category.map_or(true, |c| e.category.as_deref() == Some(c)))
        .collect();

    match query.sort {
        SortOrder::DateDesc => listed.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::DateAsc => listed.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::HoursDesc => listed.sort_by(|a, b| b.hours.total_cmp(&a.hours)),
        SortOrder::HoursAsc => listed.sort_by(|a, b| a.hours.total_cmp(&b.hours)),
    }
    listed
}

fn quick_search_hit(entry: &Entry, term: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(term);
    contains(&entry.organization)
        || contains(&entry.activity)
        || entry.description.as_deref().is_some_and(contains)
        || entry.category.as_deref().is_some_and(contains)
}
