//! Plain-text renderer

use std::fmt::Write;

use super::escape::format_hours;
use super::ReportContext;

const RULE_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 40;
const VALUE_WIDTH: usize = 10;

pub(super) fn render(ctx: &ReportContext) -> String {
    let stats = ctx.stats;
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut txt = String::new();

    let _ = writeln!(txt, "VOLUNTEER HOURS REPORT\n{heavy}\n");
    let _ = writeln!(txt, "Generated: {}\n", ctx.generated_display());

    let _ = writeln!(txt, "SUMMARY STATISTICS\n{light}");
    summary_line(&mut txt, "Total Hours:", &format_hours(stats.total_hours));
    summary_line(&mut txt, "Total Entries:", &stats.total_entries.to_string());
    summary_line(
        &mut txt,
        "Average Hours/Entry:",
        &format_hours(stats.average_hours),
    );
    summary_line(&mut txt, "Organizations:", &stats.organizations.to_string());
    summary_line(&mut txt, "Categories:", &stats.categories.to_string());
    if let Some(span) = ctx.date_span() {
        summary_line(&mut txt, "Date Range:", &span);
    }
    txt.push('\n');

    let _ = writeln!(txt, "VOLUNTEER ENTRIES\n{light}");
    for (index, entry) in ctx.entries.iter().enumerate() {
        let _ = writeln!(txt, "\nEntry #{}", index + 1);
        let _ = writeln!(txt, "  Date:         {}", entry.date.format("%Y-%m-%d"));
        let _ = writeln!(txt, "  Volunteer:    {}", entry.effective_volunteer());
        let _ = writeln!(txt, "  Organization: {}", entry.organization);
        let _ = writeln!(txt, "  Activity:     {}", entry.activity);
        let _ = writeln!(txt, "  Hours:        {}", format_hours(entry.hours));
        let _ = writeln!(txt, "  Category:     {}", entry.category_label().unwrap_or("N/A"));
        if let Some(description) = entry.description_text() {
            let _ = writeln!(txt, "  Description:  {}", description);
        }
    }
    txt.push('\n');

    let _ = writeln!(txt, "SUMMARY BY ORGANIZATION\n{light}");
    for (org, hours) in stats.ranked_orgs() {
        hours_line(&mut txt, org, hours);
    }
    txt.push('\n');

    if stats.has_categories() {
        let _ = writeln!(txt, "SUMMARY BY CATEGORY\n{light}");
        for (category, hours) in stats.ranked_categories() {
            hours_line(&mut txt, category, hours);
        }
        txt.push('\n');
    }

    let _ = writeln!(txt, "{heavy}\nEnd of Report");
    txt
}

fn summary_line(txt: &mut String, label: &str, value: &str) {
    let _ = writeln!(txt, "{label:<LABEL_WIDTH$} {value:>VALUE_WIDTH$}");
}

fn hours_line(txt: &mut String, label: &str, hours: f64) {
    let _ = writeln!(
        txt,
        "{label:<LABEL_WIDTH$} {:>VALUE_WIDTH$} hours",
        format_hours(hours)
    );
}

#[cfg(test)]
mod tests {
    use crate::report::test_support::*;
    use crate::report::ReportFormat;

    #[test]
    fn test_text_banner_and_summary_lines() {
        let content = render_all(&sample_entries(), ReportFormat::Text).content;
        assert!(content.starts_with("VOLUNTEER HOURS REPORT\n"));
        assert!(content.contains(&"=".repeat(60)));
        assert!(content.contains("Generated: 2024-06-15 12:00:00"));
        let expected = format!("{:<40} {:>10}\n", "Total Hours:", "16.50");
        assert!(content.contains(&expected));
        assert!(content.contains(&format!("{:<40} {:>10}\n", "Total Entries:", "5")));
    }

    #[test]
    fn test_text_numbered_entries() {
        let content = render_all(&sample_entries(), ReportFormat::Text).content;
        assert!(content.contains("\nEntry #1\n  Date:         2024-01-15\n"));
        assert!(content.contains("Entry #5"));
        assert!(content.contains("  Volunteer:    Me\n"));
        assert!(content.contains("  Hours:        2.50\n"));
        assert!(content.contains("  Category:     N/A\n"));
        assert!(content.contains("  Description:  Sorted donations\n"));
    }

    #[test]
    fn test_text_org_summary_fixed_width() {
        let content = render_all(&sample_entries(), ReportFormat::Text).content;
        let line = content
            .lines()
            .find(|l| l.starts_with("Food Bank "))
            .unwrap();
        assert_eq!(line, format!("{:<40} {:>10} hours", "Food Bank", "7.00"));
        assert_eq!(line.len(), 40 + 1 + 10 + " hours".len());
        assert!(content.contains("SUMMARY BY ORGANIZATION"));
        assert!(content.contains("SUMMARY BY CATEGORY"));
        assert!(content.ends_with("End of Report\n"));
    }

    #[test]
    fn test_text_empty_report() {
        let content = render_all(&[], ReportFormat::Text).content;
        assert!(!content.contains("Entry #"));
        assert!(!content.contains("Date Range"));
        assert!(!content.contains("SUMMARY BY CATEGORY"));
        assert!(content.contains("End of Report"));
    }
}
