mod format;
mod json;
mod render;
mod table;
mod text;

pub(crate) use json::output_report_json;
pub(crate) use render::render_file;
pub(crate) use table::{ReportTableOptions, print_report_table};
pub(crate) use text::format_report;
