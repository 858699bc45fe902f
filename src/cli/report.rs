//! `volhours report` subcommand

use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use crate::config::Config;
use crate::report::{generate_report, ReportFormat};
use crate::services::lenient::{parse_count, parse_number};
use crate::services::{Clock, DateRange, EntryLoader, FilterCriteria, TimeUnit};
use crate::types::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangeKind {
    All,
    Ytd,
    Custom,
    Last,
}

/// Generate a report file
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Output format: csv, html, md, txt or json (unknown names fall back to csv)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Date window (implied by --start/--end or --last when omitted)
    #[arg(long, value_enum)]
    pub range: Option<RangeKind>,

    /// Custom range start, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// Custom range end, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,

    /// Count for a trailing window, e.g. --last 30
    #[arg(long, value_name = "N")]
    pub last: Option<String>,

    /// Unit for --last: hours, days, weeks, months or years
    #[arg(long, default_value = "days")]
    pub unit: String,

    #[arg(long)]
    pub volunteer: Option<String>,

    #[arg(long)]
    pub organization: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive activity search
    #[arg(long)]
    pub activity: Option<String>,

    /// Case-insensitive description search
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub min_hours: Option<String>,

    #[arg(long)]
    pub max_hours: Option<String>,

    /// Directory to write the report into
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the report instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl ReportArgs {
    pub fn format(&self, config: &Config) -> ReportFormat {
        self.format
            .as_deref()
            .map(ReportFormat::from_name_or_default)
            .unwrap_or_else(|| config.default_format())
    }

    pub fn date_range(&self) -> Option<DateRange> {
        let kind = self.range.or(if self.start.is_some() || self.end.is_some() {
            Some(RangeKind::Custom)
        } else if self.last.is_some() {
            Some(RangeKind::Last)
        } else {
            None
        })?;

        Some(match kind {
            RangeKind::All => DateRange::All,
            RangeKind::Ytd => DateRange::YearToDate,
            RangeKind::Custom => DateRange::Custom {
                start: self.start.clone(),
                end: self.end.clone(),
            },
            RangeKind::Last => DateRange::Last {
                value: self.last.as_deref().map_or(1, parse_count),
                unit: TimeUnit::from(self.unit.as_str()),
            },
        })
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            date_range: self.date_range(),
            volunteer: self.volunteer.clone(),
            organization: self.organization.clone(),
            category: self.category.clone(),
            activity: self.activity.clone(),
            description: self.description.clone(),
            min_hours: self.min_hours.as_deref().and_then(parse_number),
            max_hours: self.max_hours.as_deref().and_then(parse_number),
        }
    }

    pub fn run(self, config: &Config, clock: &dyn Clock) -> Result<()> {
        let config = match &self.out {
            Some(dir) => config.clone().with_output_dir(dir.clone()),
            None => config.clone(),
        };

        let entries = EntryLoader::new(config.entries_path()).load()?;
        let format = self.format(&config);
        let report = generate_report(&entries, &self.criteria(), format, clock)?;

        if self.stdout {
            print!("{}", report.content);
            return Ok(());
        }

        fs::create_dir_all(config.output_dir())?;
        let path = config.output_path(&report.filename);
        fs::write(&path, &report.content)?;
        info!(path = %path.display(), mime = %report.mime_type, "report written");
        println!("Wrote {}", path.display());
        Ok(())
    }
}
