//! Self-contained HTML renderer with inline styles

use std::fmt::Write;

use super::escape::{escape_html, format_hours};
use super::{ReportContext, REPORT_TITLE};

const STYLE: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            background: #f5f5f5;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        h1 { color: #333; border-bottom: 3px solid #4CAF50; padding-bottom: 10px; }
        h2 { color: #555; margin-top: 30px; }
        .stats {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 15px;
            margin: 20px 0;
        }
        .stat-card {
            background: #f9f9f9;
            padding: 15px;
            border-radius: 4px;
            border-left: 4px solid #4CAF50;
        }
        .stat-label { font-size: 0.9em; color: #666; margin-bottom: 5px; }
        .stat-value { font-size: 1.5em; font-weight: bold; color: #333; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th { background: #4CAF50; color: white; padding: 12px; text-align: left; font-weight: 600; }
        td { padding: 10px 12px; border-bottom: 1px solid #ddd; }
        tr:hover { background: #f5f5f5; }
        .summary-table { max-width: 500px; }
        .footer {
            margin-top: 30px;
            padding-top: 20px;
            border-top: 1px solid #ddd;
            color: #666;
            font-size: 0.9em;
        }
        @media print {
            body { background: white; }
            .container { box-shadow: none; }
        }
"#;

// Writing into a String cannot fail, so fmt results are discarded below.

pub(super) fn render(ctx: &ReportContext) -> String {
    let stats = ctx.stats;
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
         <title>{title}</title>\n    <style>\n{STYLE}    </style>\n</head>\n<body>\n    \
         <div class=\"container\">\n        <h1>{title}</h1>\n\n",
        title = REPORT_TITLE,
    );

    html.push_str("        <div class=\"stats\">\n");
    let cards = [
        ("Total Hours", format_hours(stats.total_hours)),
        ("Total Entries", stats.total_entries.to_string()),
        ("Organizations", stats.organizations.to_string()),
        ("Categories", stats.categories.to_string()),
        ("Average Hours/Entry", format_hours(stats.average_hours)),
    ];
    for (label, value) in cards {
        let _ = writeln!(
            html,
            "            <div class=\"stat-card\">\n                \
             <div class=\"stat-label\">{label}</div>\n                \
             <div class=\"stat-value\">{value}</div>\n            </div>"
        );
    }
    html.push_str("        </div>\n\n");

    if let Some(span) = ctx.date_span() {
        let _ = writeln!(
            html,
            "        <p><strong>Date Range:</strong> {}</p>\n",
            span
        );
    }

    html.push_str(
        "        <h2>Volunteer Entries</h2>\n        <table>\n            \
         <thead>\n                <tr>",
    );
    for column in [
        "Date",
        "Volunteer",
        "Organization",
        "Activity",
        "Hours",
        "Category",
        "Description",
    ] {
        let _ = write!(html, "<th>{}</th>", column);
    }
    html.push_str("</tr>\n            </thead>\n            <tbody>\n");
    for entry in ctx.entries {
        let _ = writeln!(
            html,
            "                <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.date.format("%Y-%m-%d"),
            escape_html(entry.effective_volunteer()),
            escape_html(&entry.organization),
            escape_html(&entry.activity),
            format_hours(entry.hours),
            escape_html(entry.category_label().unwrap_or("-")),
            escape_html(entry.description_text().unwrap_or("-")),
        );
    }
    html.push_str("            </tbody>\n        </table>\n\n");

    summary_table(&mut html, "Summary by Organization", "Organization", stats.ranked_orgs());
    if stats.has_categories() {
        summary_table(&mut html, "Summary by Category", "Category", stats.ranked_categories());
    }

    let _ = write!(
        html,
        "        <div class=\"footer\">\n            Generated on {}\n        </div>\n    \
         </div>\n</body>\n</html>\n",
        ctx.generated_display()
    );

    html
}

fn summary_table(html: &mut String, title: &str, label: &str, ranked: Vec<(&str, f64)>) {
    let _ = writeln!(
        html,
        "        <h2>{title}</h2>\n        <table class=\"summary-table\">\n            \
         <thead>\n                <tr><th>{label}</th><th>Total Hours</th></tr>\n            \
         </thead>\n            <tbody>"
    );
    for (name, hours) in ranked {
        let _ = writeln!(
            html,
            "                <tr><td>{}</td><td>{}</td></tr>",
            escape_html(name),
            format_hours(hours)
        );
    }
    html.push_str("            </tbody>\n        </table>\n\n");
}

#[cfg(test)]
mod tests {
    use crate::report::test_support::*;
    use crate::report::ReportFormat;

    #[test]
    fn test_html_structure() {
        let content = render_all(&sample_entries(), ReportFormat::Html).content;
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains("<html lang=\"en\">"));
        assert!(content.contains("<style>"));
        assert!(content.trim_end().ends_with("</html>"));
        assert_eq!(content.matches("<table").count(), 3);
        assert_eq!(content.matches("</table>").count(), 3);
    }

    #[test]
    fn test_html_stats_cards() {
        let content = render_all(&sample_entries(), ReportFormat::Html).content;
        assert!(content.contains("<div class=\"stat-label\">Total Hours</div>"));
        assert!(content.contains("<div class=\"stat-value\">16.50</div>"));
        assert!(content.contains("<div class=\"stat-value\">3.30</div>"));
        assert!(content.contains("<strong>Date Range:</strong> 2024-01-15 to 2024-10-01"));
        assert!(content.contains("Generated on 2024-06-15 12:00:00"));
    }

    #[test]
    fn test_html_escapes_free_text() {
        let entries = vec![make_entry(
            "1",
            (2024, 5, 1),
            Some("<b>Bob</b>"),
            "Tom & Jerry's \"Place\"",
            "<script>alert(1)</script>",
            1.0,
            Some("A<B"),
            None,
        )];
        let content = render_all(&entries, ReportFormat::Html).content;
        assert!(!content.contains("<script>alert"));
        assert!(content.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(content.contains("&lt;b&gt;Bob&lt;/b&gt;"));
        assert!(content.contains("Tom &amp; Jerry&#39;s &quot;Place&quot;"));
        assert!(content.contains("<td>1.00</td><td>A&lt;B</td><td>-</td>"));
    }

    #[test]
    fn test_html_ranked_summaries() {
        let content = render_all(&sample_entries(), ReportFormat::Html).content;
        let org_section = content.split("Summary by Organization").nth(1).unwrap();
        let food = org_section.find("<td>Food Bank</td><td>7.00</td>").unwrap();
        let animal = org_section.find("<td>Animal Shelter</td><td>2.00</td>").unwrap();
        assert!(food < animal);
        assert!(content.contains("Summary by Category"));
    }

    #[test]
    fn test_html_missing_category_shows_dash() {
        let content = render_all(&sample_entries(), ReportFormat::Html).content;
        assert!(content.contains("<td>5.00</td><td>-</td><td>-</td>"));
    }

    #[test]
    fn test_html_empty_report() {
        let content = render_all(&[], ReportFormat::Html).content;
        assert!(content.contains("<div class=\"stat-value\">0.00</div>"));
        assert!(!content.contains("Date Range"));
        assert!(!content.contains("Summary by Category"));
        assert!(content.contains("</html>"));
    }
}
