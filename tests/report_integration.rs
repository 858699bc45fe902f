//! End-to-end: load the fixture file, filter, summarise and render

use std::path::PathBuf;

use chrono::NaiveDate;
use volhours::services::{
    calculate_statistics, filter_entries, resolve_date_range, DateRange, EntryLoader,
    FilterCriteria, FixedClock,
};
use volhours::types::Entry;
use volhours::{generate_report, ReportFormat, ReportGenerator};

fn fixture_entries() -> Vec<Entry> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("entries.json");
    EntryLoader::new(path).load().unwrap()
}

fn clock() -> FixedClock {
    FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

fn ids(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

#[test]
fn test_fixture_skips_invalid_rows() {
    let entries = fixture_entries();
    assert_eq!(ids(&entries), vec!["1", "2", "3", "4", "5", "7"]);
}

#[test]
fn test_statistics_over_fixture() {
    let stats = calculate_statistics(&fixture_entries());
    assert_eq!(stats.total_entries, 6);
    assert!((stats.total_hours - 17.75).abs() < 1e-9);
    assert_eq!(stats.organizations, 4);
    assert_eq!(stats.categories, 3);
    assert_eq!(stats.hours_by_org["Food Bank"], 7.0);
    assert_eq!(stats.hours_by_org["Library"], 3.75);
    assert!(!stats.hours_by_category.contains_key(""));

    let org_sum: f64 = stats.hours_by_org.values().sum();
    assert!((org_sum - stats.total_hours).abs() < 1e-9);
}

#[test]
fn test_year_to_date_report() {
    let entries = fixture_entries();
    let criteria = FilterCriteria::default().with_date_range(DateRange::YearToDate);
    let filtered = filter_entries(&entries, &criteria, &clock());
    assert_eq!(ids(&filtered), vec!["1", "2", "3", "4"]);

    let report = generate_report(&entries, &criteria, ReportFormat::Text, &clock()).unwrap();
    assert!(report.content.contains(&format!("{:<40} {:>10}", "Total Hours:", "11.50")));
    assert_eq!(report.filename, "volunteer-hours-report-2024-06-15.txt");
}

#[test]
fn test_custom_range_is_inclusive() {
    let entries = fixture_entries();
    let range = DateRange::Custom {
        start: Some("2024-02-20".into()),
        end: Some("2024-03-10".into()),
    };
    let bounds = resolve_date_range(&range, &clock()).unwrap();
    assert!(bounds.contains(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));

    let criteria = FilterCriteria::default().with_date_range(range);
    let filtered = filter_entries(&entries, &criteria, &clock());
    assert_eq!(ids(&filtered), vec!["2", "3"]);
}

#[test]
fn test_missing_volunteer_reports_as_me() {
    let entries = fixture_entries();
    let criteria = FilterCriteria::default().with_volunteer("Me");
    let report = generate_report(&entries, &criteria, ReportFormat::Csv, &clock()).unwrap();
    assert!(report.content.contains(r#""2024-06-05","Me","Library""#));
    assert!(report.content.contains(r#""2023-12-31","Me","Library""#));
    assert!(report.content.contains(r#""Total Entries","2""#));
}

#[test]
fn test_every_format_renders_fixture() {
    let generator = ReportGenerator::with_clock(fixture_entries(), Box::new(clock()));
    let criteria = FilterCriteria::default().with_organization("Food Bank");

    for format in ReportFormat::ALL {
        let report = generator.generate(&criteria, format).unwrap();
        assert!(report.content.contains("Food Bank"), "{format}");
        assert!(!report.content.contains("Animal Shelter"), "{format}");
        assert!(report.filename.ends_with(format.extension()));
    }

    let json = generator.generate(&criteria, ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json.content).unwrap();
    assert_eq!(value["entries"].as_array().unwrap().len(), 2);
    assert_eq!(value["summary"]["totalHours"], 7.0);
}
