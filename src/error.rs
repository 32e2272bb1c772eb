use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning a decoded response into per-character counts.
#[derive(Debug, Error)]
pub(crate) enum EngineError {
    #[error("Category \"{category}\" not found for character {character}")]
    CategoryNotFound { character: String, category: String },

    #[error("Statistic \"{description}\" does not match the dungeon identity pattern")]
    UnparseableIdentity { description: String },

    #[error("Unexpected response shape for character {character}: {detail}")]
    DecodeMismatch { character: String, detail: String },

    #[error("Completion count overflow in {scope}")]
    CountOverflow { scope: String },
}

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("Missing Battle.net credentials (set BNET_CLIENT_ID and BNET_CLIENT_SECRET)")]
    MissingCredentials,

    #[error("Token request failed: {0}")]
    Token(String),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("No characters configured (pass --character or set `characters` in the config file)")]
    NoCharacters,

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("All {count} characters failed; last error: {last}")]
    AllCharactersFailed { count: usize, last: String },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_display_category() {
        let e = EngineError::CategoryNotFound {
            character: "niktonian".to_string(),
            category: "Dungeons & Raids".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Category "Dungeons & Raids" not found for character niktonian"#
        );
    }

    #[test]
    fn engine_error_display_identity() {
        let e = EngineError::UnparseableIdentity {
            description: "Ragefire Chasm".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Statistic "Ragefire Chasm" does not match the dungeon identity pattern"#
        );
    }

    #[test]
    fn api_error_display_status() {
        let e = ApiError::Status {
            url: "https://example.test/x".to_string(),
            status: 404,
        };
        assert_eq!(e.to_string(), "Request to https://example.test/x returned HTTP 404");
    }

    #[test]
    fn app_error_from_engine_error() {
        let engine = EngineError::DecodeMismatch {
            character: "audney".to_string(),
            detail: "missing sub_categories".to_string(),
        };
        let app: AppError = engine.into();
        assert_eq!(
            app.to_string(),
            "Unexpected response shape for character audney: missing sub_categories"
        );
    }

    #[test]
    fn app_error_display_timezone() {
        let e = AppError::InvalidTimezone {
            input: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid timezone: Mars/Olympus");
    }
}
