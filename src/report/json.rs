//! JSON renderer

use serde::Serialize;

use super::{ReportContext, REPORT_TITLE};
use crate::services::FilterCriteria;
use crate::types::{Entry, ReportStats, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    title: &'a str,
    generated_at: String,
    filters: &'a FilterCriteria,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: Metadata<'a>,
    summary: &'a ReportStats,
    entries: &'a [Entry],
}

pub(super) fn render(ctx: &ReportContext) -> Result<String> {
    let report = JsonReport {
        metadata: Metadata {
            title: REPORT_TITLE,
            generated_at: ctx.generated_iso(),
            filters: ctx.criteria,
        },
        summary: ctx.stats,
        entries: ctx.entries,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
