//! Report generation: filter, summarise, render to one of five formats

mod delimited;
pub mod escape;
mod html;
mod json;
mod markdown;
mod text;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::services::{filter_entries, Aggregator, Clock, FilterCriteria, SystemClock};
use crate::types::{Entry, ReportError, ReportStats, Result};

/// Title shared by every format
pub const REPORT_TITLE: &str = "Volunteer Hours Report";

const FILENAME_PREFIX: &str = "volunteer-hours-report";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    Html,
    Markdown,
    Text,
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 5] = [
        ReportFormat::Csv,
        ReportFormat::Html,
        ReportFormat::Markdown,
        ReportFormat::Text,
        ReportFormat::Json,
    ];

    /// Unknown names fall back to CSV.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: ReportError| {
            warn!(%err, "falling back to csv");
            ReportFormat::Csv
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "md",
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Html => "text/html",
            ReportFormat::Markdown => "text/markdown",
            ReportFormat::Text => "text/plain",
            ReportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "html" | "htm" => Ok(ReportFormat::Html),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            "txt" | "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(ReportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Rendered document plus download hints. Writing it out is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedReport {
    pub content: String,
    pub filename: String,
    pub mime_type: String,
}

/// Everything a renderer reads
pub(crate) struct ReportContext<'a> {
    pub entries: &'a [Entry],
    pub stats: &'a ReportStats,
    pub criteria: &'a FilterCriteria,
    /// UTC instant for machine-readable timestamps
    pub generated_at: DateTime<Utc>,
    /// Local wall-clock time for human-readable footers
    pub generated_local: NaiveDateTime,
}

impl ReportContext<'_> {
    pub fn generated_iso(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }

    pub fn generated_display(&self) -> String {
        self.generated_local.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// "earliest to latest", when there are entries
    pub fn date_span(&self) -> Option<String> {
        match (self.stats.date_range.earliest, self.stats.date_range.latest) {
            (Some(earliest), Some(latest)) => Some(format!("{} to {}", earliest, latest)),
            _ => None,
        }
    }
}

/// Render already-filtered entries and their statistics.
pub fn render(
    entries: &[Entry],
    stats: &ReportStats,
    criteria: &FilterCriteria,
    format: ReportFormat,
    clock: &dyn Clock,
) -> Result<RenderedReport> {
    let ctx = ReportContext {
        entries,
        stats,
        criteria,
        generated_at: clock.now_utc(),
        generated_local: clock.now(),
    };

    let content = match format {
        ReportFormat::Csv => delimited::render(&ctx)?,
        ReportFormat::Html => html::render(&ctx),
        ReportFormat::Markdown => markdown::render(&ctx),
        ReportFormat::Text => text::render(&ctx),
        ReportFormat::Json => json::render(&ctx)?,
    };

    Ok(RenderedReport {
        content,
        filename: format!(
            "{}-{}.{}",
            FILENAME_PREFIX,
            clock.today().format("%Y-%m-%d"),
            format.extension()
        ),
        mime_type: format.mime_type().to_string(),
    })
}

/// Filter, summarise and render in one call.
pub fn generate_report(
    entries: &[Entry],
    criteria: &FilterCriteria,
    format: ReportFormat,
    clock: &dyn Clock,
) -> Result<RenderedReport> {
    let filtered = filter_entries(entries, criteria, clock);
    let stats = Aggregator::statistics(&filtered);
    debug!(format = %format, entries = filtered.len(), "rendering report");
    render(&filtered, &stats, criteria, format, clock)
}

/// Holds an entry collection and a clock; the collection can be swapped at any time.
pub struct ReportGenerator {
    entries: Vec<Entry>,
    clock: Box<dyn Clock>,
}

impl ReportGenerator {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self::with_clock(entries, Box::new(SystemClock))
    }

    pub fn with_clock(entries: Vec<Entry>, clock: Box<dyn Clock>) -> Self {
        Self { entries, clock }
    }

    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<Entry> {
        filter_entries(&self.entries, criteria, self.clock.as_ref())
    }

    pub fn statistics(&self, criteria: &FilterCriteria) -> ReportStats {
        Aggregator::statistics(&self.filter(criteria))
    }

    pub fn generate(
        &self,
        criteria: &FilterCriteria,
        format: ReportFormat,
    ) -> Result<RenderedReport> {
        generate_report(&self.entries, criteria, format, self.clock.as_ref())
    }
}
