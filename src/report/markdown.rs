//! Markdown renderer (pipe tables)

use std::fmt::Write;

use super::escape::{escape_markdown, format_hours};
use super::{ReportContext, REPORT_TITLE};

pub(super) fn render(ctx: &ReportContext) -> String {
    let stats = ctx.stats;
    let mut md = String::new();

    let _ = writeln!(md, "# {}\n", REPORT_TITLE);
    let _ = writeln!(md, "**Generated:** {}\n", ctx.generated_iso());

    md.push_str("## Summary Statistics\n\n");
    md.push_str("| Metric | Value |\n|--------|-------|\n");
    let _ = writeln!(md, "| Total Hours | {} |", format_hours(stats.total_hours));
    let _ = writeln!(md, "| Total Entries | {} |", stats.total_entries);
    let _ = writeln!(
        md,
        "| Average Hours/Entry | {} |",
        format_hours(stats.average_hours)
    );
    let _ = writeln!(md, "| Organizations | {} |", stats.organizations);
    let _ = writeln!(md, "| Categories | {} |", stats.categories);
    if let Some(span) = ctx.date_span() {
        let _ = writeln!(md, "| Date Range | {} |", span);
    }
    md.push('\n');

    md.push_str("## Volunteer Entries\n\n");
    md.push_str(
        "| Date | Volunteer | Organization | Activity | Hours | Category | Description |\n\
         |------|-----------|--------------|----------|-------|----------|-------------|\n",
    );
    for entry in ctx.entries {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} | {} |",
            entry.date.format("%Y-%m-%d"),
            escape_markdown(entry.effective_volunteer()),
            escape_markdown(&entry.organization),
            escape_markdown(&entry.activity),
            format_hours(entry.hours),
            escape_markdown(entry.category_label().unwrap_or("-")),
            escape_markdown(entry.description_text().unwrap_or("-")),
        );
    }
    md.push('\n');

    summary_table(&mut md, "Summary by Organization", "Organization", stats.ranked_orgs());
    if stats.has_categories() {
        summary_table(&mut md, "Summary by Category", "Category", stats.ranked_categories());
    }

    md.push_str("---\n\n*Report generated by Volunteer Hours Tracker*\n");
    md
}

fn summary_table(md: &mut String, title: &str, label: &str, ranked: Vec<(&str, f64)>) {
    let _ = writeln!(md, "## {}\n", title);
    let _ = writeln!(md, "| {} | Total Hours |", label);
    let _ = writeln!(md, "|{}|-------------|", "-".repeat(label.len() + 2));
    for (name, hours) in ranked {
        let _ = writeln!(md, "| {} | {} |", escape_markdown(name), format_hours(hours));
    }
    md.push('\n');
}
