//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigMergeBy, ConfigOnError};
use crate::core::IdentityPolicy;

use super::commands::Commands;

pub(crate) const DEFAULT_REGION: &str = "us";
pub(crate) const DEFAULT_REALM: &str = "aegwynn";
pub(crate) const DEFAULT_LOCALE: &str = "en_US";
pub(crate) const DEFAULT_CHARACTERS: &[&str] = &["niktonian", "audney"];

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum MergeBy {
    /// Merge by the parenthetical variant, e.g. "Heroic" (default)
    #[default]
    Variant,
    /// Merge by the base dungeon name
    Base,
}

impl From<MergeBy> for IdentityPolicy {
    fn from(value: MergeBy) -> Self {
        match value {
            MergeBy::Variant => IdentityPolicy::Variant,
            MergeBy::Base => IdentityPolicy::Base,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum OnError {
    /// Stop at the first character that fails (default)
    #[default]
    Abort,
    /// Leave failing characters out and note them
    Skip,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "raidstats")]
#[command(about = "Dungeon and raid completion counts from the Battle.net API", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Character to include (repeatable)
    #[arg(short = 'c', long = "character", global = true, value_name = "NAME")]
    pub(crate) characters: Vec<String>,

    /// Realm the characters live on (e.g., "aegwynn")
    #[arg(long, global = true)]
    pub(crate) realm: Option<String>,

    /// API region (us, eu, kr, tw)
    #[arg(long, global = true)]
    pub(crate) region: Option<String>,

    /// API locale (e.g., "en_US")
    #[arg(long, global = true)]
    pub(crate) locale: Option<String>,

    /// Timezone for the freshness line (e.g., "UTC", "America/New_York")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Which part of a statistic name identifies a dungeon [default: variant]
    #[arg(long, global = true, value_enum)]
    pub(crate) merge_by: Option<MergeBy>,

    /// What to do when one character cannot be processed [default: abort]
    #[arg(long, global = true, value_enum)]
    pub(crate) on_error: Option<OnError>,

    /// Read saved responses (<DIR>/<character>.json) instead of calling the API
    #[arg(short = 'i', long, global = true, value_name = "DIR")]
    pub(crate) input_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.quiet && config.quiet {
            self.quiet = true;
        }

        // Enum options: only apply if CLI didn't set them
        if self.merge_by.is_none() {
            self.merge_by = config.merge_by.map(|merge_by| match merge_by {
                ConfigMergeBy::Variant => MergeBy::Variant,
                ConfigMergeBy::Base => MergeBy::Base,
            });
        }
        if self.on_error.is_none() {
            self.on_error = config.on_error.map(|on_error| match on_error {
                ConfigOnError::Abort => OnError::Abort,
                ConfigOnError::Skip => OnError::Skip,
            });
        }

        // String options: only apply if CLI didn't set them
        if self.characters.is_empty() {
            self.characters = config.characters.clone();
        }
        if self.realm.is_none() {
            self.realm = config.realm.clone();
        }
        if self.region.is_none() {
            self.region = config.region.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.input_dir.is_none() {
            self.input_dir = config.input_dir.clone();
        }

        self
    }

    /// Characters to fetch, falling back to the built-in roster
    pub(crate) fn character_list(&self) -> Vec<String> {
        if self.characters.is_empty() {
            return DEFAULT_CHARACTERS.iter().map(|c| c.to_string()).collect();
        }
        self.characters.clone()
    }

    pub(crate) fn merge_by(&self) -> MergeBy {
        self.merge_by.unwrap_or_default()
    }

    pub(crate) fn on_error(&self) -> OnError {
        self.on_error.unwrap_or_default()
    }

    pub(crate) fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub(crate) fn realm(&self) -> &str {
        self.realm.as_deref().unwrap_or(DEFAULT_REALM)
    }

    pub(crate) fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
