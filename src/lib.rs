//! Volunteer hours reporting: date ranges, filters, statistics and
//! CSV/HTML/Markdown/text/JSON report rendering.

pub mod cli;
pub mod config;
pub mod report;
pub mod services;
pub mod types;

pub use report::{generate_report, RenderedReport, ReportFormat, ReportGenerator};
pub use services::{calculate_statistics, filter_entries, resolve_date_range};
