//! Plain-text report body
//!
//! This is the text substituted into the rendered template, so its layout is
//! fixed: dungeon lines, expansion totals, the grand total, a blank line and
//! the freshness line, each terminated by a newline.

use chrono::{DateTime, Utc};

use crate::consts::{FRESHNESS_FORMAT, UNKNOWN};
use crate::core::AggregateReport;
use crate::utils::Timezone;

pub(crate) fn format_freshness(freshest: Option<DateTime<Utc>>, timezone: Timezone) -> String {
    match freshest {
        Some(ts) => timezone.format(ts, FRESHNESS_FORMAT),
        None => UNKNOWN.to_string(),
    }
}

pub(crate) fn format_report(report: &AggregateReport, timezone: Timezone) -> String {
    let mut body = String::new();

    for expansion in &report.expansions {
        for dungeon in &expansion.dungeons {
            body.push_str(&format!(
                "{} - {}: {}\n",
                expansion.expansion, dungeon.identity, dungeon.count
            ));
        }
        body.push_str(&format!(
            "{} Total: {}\n",
            expansion.expansion, expansion.total
        ));
    }

    body.push_str(&format!("All Expansions Total: {}\n", report.grand_total));
    body.push('\n');
    body.push_str(&format!(
        "Last Updated: {}\n",
        format_freshness(report.freshest_update, timezone)
    ));
    body
}
