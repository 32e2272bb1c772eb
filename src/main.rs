mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use clap::Parser;
use log::LevelFilter;

use cli::Cli;
use config::Config;

fn configure_logging(debug: bool, quiet: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    // RUST_LOG still wins over the flags
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let loaded = Config::load();
    let cli = Cli::parse().with_config(&loaded.config);

    configure_logging(cli.debug, cli.quiet);
    for warning in &loaded.warnings {
        log::warn!("{warning}");
    }
    if let Some(path) = &loaded.path {
        log::debug!("Loaded config from {}", path.display());
    }

    if let Err(err) = app::run(&cli, &loaded.config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
