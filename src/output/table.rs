use comfy_table::{CellAlignment, Color, Table};

use crate::core::AggregateReport;
use crate::output::format::{create_styled_table, format_count, header_cell, report_cell};
use crate::output::text::format_freshness;
use crate::utils::Timezone;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportTableOptions {
    pub(crate) use_color: bool,
    pub(crate) timezone: Timezone,
}

pub(crate) fn build_report_table(report: &AggregateReport, use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Expansion", use_color),
        header_cell("Dungeon", use_color),
        header_cell("Count", use_color),
    ]);

    let total_color = use_color.then_some(Color::Yellow);
    let grand_color = use_color.then_some(Color::Green);
    let row = |label: &str, identity: &str, count: u64, color: Option<Color>, bold: bool| {
        vec![
            report_cell(label, CellAlignment::Left, color, bold),
            report_cell(identity, CellAlignment::Left, color, bold),
            report_cell(&format_count(count), CellAlignment::Right, color, bold),
        ]
    };

    for expansion in &report.expansions {
        for dungeon in &expansion.dungeons {
            table.add_row(row(&expansion.expansion, &dungeon.identity, dungeon.count, None, false));
        }
        table.add_row(row(&expansion.expansion, "Total", expansion.total, total_color, true));
    }

    table.add_row(row("All Expansions", "Total", report.grand_total, grand_color, true));

    table
}

pub(crate) fn print_report_table(report: &AggregateReport, options: ReportTableOptions) {
    let table = build_report_table(report, options.use_color);
    println!("\n  Dungeons & Raids ({})\n", report.characters.join(", "));
    println!("{table}");
    println!(
        "\n  Last Updated: {}",
        format_freshness(report.freshest_update, options.timezone)
    );
    for skipped in &report.skipped {
        println!("  Skipped {}: {}", skipped.character, skipped.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DungeonCount, ExpansionSummary};

    #[test]
    fn table_has_dungeon_total_and_grand_rows() {
        let report = AggregateReport {
            expansions: vec![ExpansionSummary {
                expansion: "Legion".to_string(),
                total: 1200,
                dungeons: vec![
                    DungeonCount {
                        identity: "Heroic".to_string(),
                        count: 200,
                    },
                    DungeonCount {
                        identity: "Mythic".to_string(),
                        count: 1000,
                    },
                ],
            }],
            grand_total: 1200,
            ..AggregateReport::default()
        };

        let table = build_report_table(&report, false);
        // two dungeons, one expansion total, one grand total
        assert_eq!(table.row_iter().count(), 4);

        let rendered = table.to_string();
        assert!(rendered.contains("Expansion"));
        assert!(rendered.contains("Mythic"));
        assert!(rendered.contains("1,000"));
        assert!(rendered.contains("All Expansions"));
        assert!(rendered.contains("1,200"));
    }

    #[test]
    fn empty_report_only_has_grand_total() {
        let table = build_report_table(&AggregateReport::default(), false);
        assert_eq!(table.row_iter().count(), 1);
    }

    #[test]
    fn colored_table_keeps_text() {
        let report = AggregateReport {
            grand_total: 3,
            ..AggregateReport::default()
        };
        let table = build_report_table(&report, true);
        assert!(table.to_string().contains("All Expansions"));
    }
}
