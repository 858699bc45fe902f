//! Volunteer entry type

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ReportError, Result};

/// Display name used when an entry has no volunteer recorded
pub const DEFAULT_VOLUNTEER: &str = "Me";

/// Label used for entries without a category in category views
pub const UNCATEGORIZED: &str = "Uncategorized";

const MAX_ACTIVITY_LEN: usize = 500;
const MAX_CATEGORY_LEN: usize = 100;
const MAX_HOURS: f64 = 999.99;

/// One recorded volunteer-activity occurrence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteer: Option<String>,
    pub organization: String,
    pub activity: String,
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// Volunteer name with the "Me" default applied for absent or empty values.
    pub fn effective_volunteer(&self) -> &str {
        non_empty(self.volunteer.as_deref()).unwrap_or(DEFAULT_VOLUNTEER)
    }

    /// Category, or `None` when absent or empty
    pub fn category_label(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    pub fn description_text(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Check the entry against the same limits the API enforces on create.
    pub fn validate(&self) -> Result<()> {
        if self.organization.trim().is_empty() {
            return Err(ReportError::Validation(format!(
                "entry {}: organization is required",
                self.id
            )));
        }
        let activity_len = self.activity.chars().count();
        if activity_len == 0 {
            return Err(ReportError::Validation(format!(
                "entry {}: activity is required",
                self.id
            )));
        }
        if activity_len > MAX_ACTIVITY_LEN {
            return Err(ReportError::Validation(format!(
                "entry {}: activity too long ({} > {})",
                self.id, activity_len, MAX_ACTIVITY_LEN
            )));
        }
        if !self.hours.is_finite() || self.hours < 0.0 || self.hours > MAX_HOURS {
            return Err(ReportError::Validation(format!(
                "entry {}: hours must be between 0 and {}",
                self.id, MAX_HOURS
            )));
        }
        if let Some(category) = &self.category {
            if category.chars().count() > MAX_CATEGORY_LEN {
                return Err(ReportError::Validation(format!(
                    "entry {}: category too long",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
