//! CSV renderer
//!
//! Sections are separated by a blank line. Every field is quoted so that
//! spreadsheet tools never reinterpret dates or numbers.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::escape::format_hours;
use super::{ReportContext, REPORT_TITLE};
use crate::types::{ReportError, Result};

const ENTRY_COLUMNS: [&str; 7] = [
    "Date",
    "Volunteer",
    "Organization",
    "Activity",
    "Hours",
    "Category",
    "Description",
];

type Row = Vec<String>;

pub(super) fn render(ctx: &ReportContext) -> Result<String> {
    let stats = ctx.stats;

    let mut header: Vec<Row> = vec![
        vec![REPORT_TITLE.to_string()],
        vec!["Generated".into(), ctx.generated_iso()],
        vec!["Total Hours".into(), format_hours(stats.total_hours)],
        vec!["Total Entries".into(), stats.total_entries.to_string()],
        vec!["Average Hours".into(), format_hours(stats.average_hours)],
    ];
    if let Some(span) = ctx.date_span() {
        header.push(vec!["Date Range".into(), span]);
    }

    let mut table: Vec<Row> = vec![ENTRY_COLUMNS.iter().map(|c| c.to_string()).collect()];
    table.extend(ctx.entries.iter().map(|entry| {
        vec![
            entry.date.format("%Y-%m-%d").to_string(),
            entry.effective_volunteer().to_string(),
            entry.organization.clone(),
            entry.activity.clone(),
            format_hours(entry.hours),
            entry.category.clone().unwrap_or_default(),
            entry.description.clone().unwrap_or_default(),
        ]
    }));

    let mut sections = vec![
        write_rows(&header)?,
        write_rows(&table)?,
        write_rows(&summary_rows(
            "Summary by Organization",
            "Organization",
            stats.ranked_orgs(),
        ))?,
    ];
    if stats.has_categories() {
        sections.push(write_rows(&summary_rows(
            "Summary by Category",
            "Category",
            stats.ranked_categories(),
        ))?);
    }

    Ok(sections.join("\n"))
}

fn summary_rows(title: &str, label: &str, ranked: Vec<(&str, f64)>) -> Vec<Row> {
    let mut rows: Vec<Row> = vec![vec![title.into()], vec![label.into(), "Hours".into()]];
    rows.extend(
        ranked
            .into_iter()
            .map(|(name, hours)| vec![name.to_string(), format_hours(hours)]),
    );
    rows
}

fn write_rows(rows: &[Row]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::report::test_support::*;
    use crate::report::ReportFormat;

    fn csv_content(entries: &[crate::types::Entry]) -> String {
        render_all(entries, ReportFormat::Csv).content
    }

    #[test]
    fn test_csv_header_rows() {
        let content = csv_content(&sample_entries());
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], r#""Volunteer Hours Report""#);
        assert_eq!(lines[1], r#""Generated","2024-06-15T12:00:00.000Z""#);
        assert_eq!(lines[2], r#""Total Hours","16.50""#);
        assert_eq!(lines[3], r#""Total Entries","5""#);
        assert_eq!(lines[4], r#""Average Hours","3.30""#);
        assert_eq!(lines[5], r#""Date Range","2024-01-15 to 2024-10-01""#);
        assert_eq!(lines[6], "");
        assert_eq!(
            lines[7],
            r#""Date","Volunteer","Organization","Activity","Hours","Category","Description""#
        );
    }

    #[test]
    fn test_csv_entry_rows() {
        let content = csv_content(&sample_entries());
        assert!(content.contains(
            r#""2024-01-15","John Doe","Food Bank","Food sorting","3.00","Social Services","Sorted donations""#
        ));
        // Missing volunteer shows as Me, missing category/description as empty
        assert!(content.contains(r#""2024-06-05","Me","Library""#));
        assert!(content.contains(r#""Park Cleanup","Trail maintenance","5.00","","""#));
    }

    #[test]
    fn test_csv_summaries_ranked() {
        let content = csv_content(&sample_entries());
        let org_section = content.split("\"Summary by Organization\"").nth(1).unwrap();
        let food = org_section.find(r#""Food Bank","7.00""#).unwrap();
        let park = org_section.find(r#""Park Cleanup","5.00""#).unwrap();
        let library = org_section.find(r#""Library","2.50""#).unwrap();
        assert!(food < park && park < library);

        assert!(content.contains("\"Summary by Category\"\n\"Category\",\"Hours\"\n"));
        assert!(content.contains(r#""Social Services","7.00""#));
        assert!(content.ends_with("\n"));
    }

    #[test]
    fn test_csv_doubles_embedded_quotes() {
        let entries = vec![make_entry(
            "1",
            (2024, 5, 1),
            None,
            r#"Joe's "Best" Org"#,
            "Cooking",
            1.0,
            None,
            Some(r#"said "hi""#),
        )];
        let content = csv_content(&entries);
        assert!(content.contains(r#""Joe's ""Best"" Org""#));
        assert!(content.contains(r#""said ""hi""""#));
    }

    #[test]
    fn test_csv_without_categories_omits_category_summary() {
        let entries = vec![make_entry("1", (2024, 5, 1), None, "Org", "Act", 1.0, None, None)];
        let content = csv_content(&entries);
        assert!(content.contains("\"Summary by Organization\""));
        assert!(!content.contains("Summary by Category"));
    }

    #[test]
    fn test_csv_empty_report() {
        let content = csv_content(&[]);
        assert!(content.contains(r#""Total Hours","0.00""#));
        assert!(content.contains(r#""Total Entries","0""#));
        assert!(!content.contains("Date Range"));
        assert!(content.contains("\"Organization\",\"Hours\""));
    }
}
