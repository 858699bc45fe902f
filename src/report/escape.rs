//! Escaping helpers shared by the markup renderers
//!
//! CSV quoting is handled by the `csv` writer (`QuoteStyle::Always` doubles
//! embedded quotes), so only HTML and Markdown need helpers here.

/// Entity-escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape pipes so text stays inside one Markdown table cell.
///
/// Newlines would also break a row, so they are folded into spaces.
pub fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Hours with exactly two decimals
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}
