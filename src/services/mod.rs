//! Services for date resolution, filtering, aggregation and loading

pub mod aggregator;
pub mod clock;
pub mod date_range;
pub mod filter;
pub mod lenient;
pub mod loader;

pub use aggregator::{Aggregator, Granularity, DASHBOARD_TOP_ORGS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date_range::{parse_date, DateBounds, DateRange, TimeUnit};
pub use filter::{
    filter_entries, list_entries, EntryQuery, FilterCriteria, FilterOptions, SortOrder,
};
pub use loader::EntryLoader;

use crate::types::{Entry, ReportStats, Result};

/// Resolve a date-range descriptor against the clock's "now".
pub fn resolve_date_range(range: &DateRange, clock: &dyn Clock) -> Result<DateBounds> {
    range.resolve(clock)
}

/// Statistics snapshot over an already-filtered entry set.
pub fn calculate_statistics(entries: &[Entry]) -> ReportStats {
    Aggregator::statistics(entries)
}
