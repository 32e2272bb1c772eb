use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub(crate) const CONFIG_ENV: &str = "RAIDSTATS_CONFIG";

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigMergeBy {
    Variant,
    Base,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigOnError {
    Abort,
    Skip,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) region: Option<String>,
    #[serde(default)]
    pub(crate) realm: Option<String>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(default)]
    pub(crate) characters: Vec<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) merge_by: Option<ConfigMergeBy>,
    #[serde(default)]
    pub(crate) on_error: Option<ConfigOnError>,
    #[serde(default)]
    pub(crate) placeholder: Option<String>,
    /// Expansion names from earliest to latest release
    #[serde(default)]
    pub(crate) expansions: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) input_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) quiet: bool,
}

/// Outcome of the config lookup, reported once logging is up
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) warnings: Vec<String>,
}

impl Config {
    pub(crate) fn load() -> LoadedConfig {
        let mut loaded = LoadedConfig::default();

        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        loaded.config = config;
                        loaded.path = Some(path);
                        return loaded;
                    }
                    Err(e) => {
                        loaded
                            .warnings
                            .push(format!("Failed to parse {}: {}", path.display(), e));
                    }
                }
            }
        }

        loaded
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 0. Explicit override
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            paths.push(PathBuf::from(explicit));
            return paths;
        }

        // 1. XDG config: ~/.config/raidstats/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("raidstats").join("config.toml"));
        }

        // 2. Platform config dir (Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("raidstats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.raidstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".raidstats.toml"));
        }

        paths
    }
}

/// Read `KEY=VALUE` pairs from a `.env` file; a missing file yields nothing
pub(crate) fn read_dotenv(path: &Path) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    let Ok(entries) = dotenvy::from_path_iter(path) else {
        return vars;
    };
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(e) => {
                log::warn!("Stopped reading {} at a malformed line: {}", path.display(), e);
                break;
            }
        }
    }
    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
    }

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            region = "eu"
            realm = "Aerie Peak"
            characters = ["niktonian", "audney"]
            timezone = "America/New_York"
            merge_by = "base"
            on_error = "skip"
            expansions = ["Classic", "Legion"]
            debug = true
            "#,
        )
        .unwrap();
        assert_eq!(config.region.as_deref(), Some("eu"));
        assert_eq!(config.characters, vec!["niktonian", "audney"]);
        assert!(matches!(config.merge_by, Some(ConfigMergeBy::Base)));
        assert!(matches!(config.on_error, Some(ConfigOnError::Skip)));
        assert_eq!(config.expansions.unwrap().len(), 2);
        assert!(config.debug);
        assert!(!config.quiet);
    }

    #[test]
    fn unknown_merge_policy_is_rejected() {
        assert!(toml::from_str::<Config>(r#"merge_by = "boss""#).is_err());
    }

    #[test]
    fn dotenv_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# credentials\nBNET_CLIENT_ID=abc # trailing comment\nexport BNET_CLIENT_SECRET=\"s3\\\"cret\"\n\nQUOTED='x y'\n",
        )
        .unwrap();

        let vars = read_dotenv(&path);
        assert_eq!(vars.get("BNET_CLIENT_ID").map(String::as_str), Some("abc"));
        assert_eq!(vars.get("BNET_CLIENT_SECRET").map(String::as_str), Some("s3\"cret"));
        assert_eq!(vars.get("QUOTED").map(String::as_str), Some("x y"));
        assert_eq!(vars.len(), 3);
    }

    #[test]
    fn missing_dotenv_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_dotenv(&dir.path().join(".env")).is_empty());
    }
}
