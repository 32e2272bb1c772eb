//! CLI subcommand definitions

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Debug, Clone, Default, Subcommand)]
pub(crate) enum Commands {
    /// Print the report text (default)
    #[default]
    Report,
    /// Show the report as a table
    Table,
    /// Substitute the report into a template file
    Render {
        /// Template containing the placeholder
        #[arg(long, default_value = "index.src.html")]
        template: PathBuf,

        /// File to write the rendered document to
        #[arg(long, default_value = "index.html")]
        output: PathBuf,

        /// Token replaced by the report text (default "{{wow}}")
        #[arg(long)]
        placeholder: Option<String>,
    },
}
