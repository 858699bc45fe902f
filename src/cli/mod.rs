mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::report::escape::format_hours;
use crate::services::{
    list_entries, Aggregator, Clock, EntryLoader, EntryQuery, FilterOptions, Granularity,
    SortOrder, SystemClock, DASHBOARD_TOP_ORGS,
};
use crate::types::Entry;

pub use report::{RangeKind, ReportArgs};

/// Volunteer hours reports and statistics
#[derive(Parser)]
#[command(name = "volhours")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding entries.json (default: ~/.volhours)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report (default)
    Report(ReportArgs),

    /// Show dashboard statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Also break hours down by day, week or month
        #[arg(long, value_enum)]
        by: Option<Granularity>,
    },

    /// List entries with quick search and sorting
    List(ListArgs),

    /// Show distinct volunteers, organizations and categories
    Options {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive search over organization, activity, description and category
    #[arg(short, long)]
    search: Option<String>,

    #[arg(long)]
    organization: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long, value_enum, default_value_t = SortOrder::DateDesc)]
    sort: SortOrder,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = match self.data_dir {
            Some(dir) => Config::with_data_dir(dir),
            None => Config::new()?,
        };
        let clock = SystemClock;

        match self.command {
            None => ReportArgs::parse_default().run(&config, &clock)?,
            Some(Commands::Report(args)) => args.run(&config, &clock)?,
            Some(Commands::Stats { json, by }) => {
                let entries = load(&config)?;
                print_stats(&entries, &clock, json, by)?;
            }
            Some(Commands::List(args)) => {
                let entries = load(&config)?;
                let query = EntryQuery {
                    search: args.search,
                    organization: args.organization,
                    category: args.category,
                    sort: args.sort,
                };
                for entry in list_entries(&entries, &query) {
                    println!("{}", list_line(entry));
                }
            }
            Some(Commands::Options { json }) => {
                let options = FilterOptions::from_entries(&load(&config)?);
                if json {
                    println!("{}", serde_json::to_string_pretty(&options)?);
                } else {
                    println!("Volunteers:    {}", options.volunteers.join(", "));
                    println!("Organizations: {}", options.organizations.join(", "));
                    println!("Categories:    {}", options.categories.join(", "));
                }
            }
        }
        Ok(())
    }
}

impl ReportArgs {
    fn parse_default() -> Self {
        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ReportArgs,
        }
        Wrapper::parse_from(["volhours"]).args
    }
}

fn load(config: &Config) -> crate::types::Result<Vec<Entry>> {
    EntryLoader::new(config.entries_path()).load()
}

fn print_stats(
    entries: &[Entry],
    clock: &dyn Clock,
    json: bool,
    by: Option<Granularity>,
) -> anyhow::Result<()> {
    let dashboard = Aggregator::dashboard(entries, clock, DASHBOARD_TOP_ORGS);
    let periods = by.map(|granularity| Aggregator::by_period(entries, granularity));

    if json {
        let value = serde_json::json!({
            "dashboard": dashboard,
            "categories": Aggregator::by_category_view(entries),
            "periods": periods,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Total hours:      {}", format_hours(dashboard.total_hours));
    println!("Total entries:    {}", dashboard.total_entries);
    println!("Organizations:    {}", dashboard.organizations);
    println!("This month:       {}", format_hours(dashboard.this_month_hours));

    if !dashboard.top_organizations.is_empty() {
        println!("\nTop organizations");
        for (org, hours) in &dashboard.top_organizations {
            println!("  {:<40} {:>10}", org, format_hours(*hours));
        }
    }

    println!("\nBy category");
    for (category, hours) in Aggregator::by_category_view(entries) {
        println!("  {:<40} {:>10}", category, format_hours(hours));
    }

    if let Some(periods) = periods {
        println!("\nBy period");
        for row in periods {
            println!("  {:<40} {:>10}", row.period, format_hours(row.hours));
        }
    }
    Ok(())
}

fn list_line(entry: &Entry) -> String {
    format!(
        "{}  {:<24} {:<30} {:>7}  {}",
        entry.date.format("%Y-%m-%d"),
        entry.organization,
        entry.activity,
        format_hours(entry.hours),
        entry.category_label().unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["volhours"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::try_parse_from(["volhours", "report", "--format", "html", "--range", "ytd"])
            .unwrap();
        match cli.command {
            Some(Commands::Report(args)) => {
                assert_eq!(args.format.as_deref(), Some("html"));
                assert_eq!(args.range, Some(RangeKind::Ytd));
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_cli_parse_stats_json_by_week() {
        let cli = Cli::try_parse_from(["volhours", "stats", "--json", "--by", "week"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Stats {
                json: true,
                by: Some(Granularity::Week)
            })
        ));
    }

    #[test]
    fn test_cli_parse_list_sort() {
        let cli = Cli::try_parse_from(["volhours", "list", "--sort", "hours-asc", "-s", "dog"])
            .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.sort, SortOrder::HoursAsc);
                assert_eq!(args.search.as_deref(), Some("dog"));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["volhours", "options", "--data-dir", "/tmp/x", "-v"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_list_line_layout() {
        let entry = Entry {
            id: "1".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            volunteer: None,
            organization: "Food Bank".into(),
            activity: "Food sorting".into(),
            hours: 3.0,
            category: None,
            description: None,
            created_at: None,
        };
        let line = list_line(&entry);
        assert!(line.starts_with("2024-01-15  Food Bank "));
        assert!(line.ends_with("   3.00  -"));
    }
}
