//! Statistics source abstraction
//!
//! A source turns a character name into a decoded statistics response. The
//! live Battle.net API and a directory of saved responses both implement it.

pub(crate) mod battlenet;
pub(crate) mod file;

use crate::core::StatsResponse;
use crate::error::{AppError, EngineError};

pub(crate) trait StatsSource {
    /// Unique name for this source
    fn name(&self) -> &'static str;

    /// Display name for log output
    fn display_name(&self) -> &'static str {
        self.name()
    }

    /// Fetch and decode one character's achievement statistics
    fn fetch(&self, character: &str) -> Result<StatsResponse, AppError>;
}

pub(crate) type BoxedSource = Box<dyn StatsSource>;

/// Decode a raw response body, reporting schema mismatches per character
pub(crate) fn decode_response(character: &str, body: &str) -> Result<StatsResponse, EngineError> {
    serde_json::from_str(body).map_err(|err| EngineError::DecodeMismatch {
        character: character.to_string(),
        detail: err.to_string(),
    })
}

pub(crate) use battlenet::BattleNetSource;
pub(crate) use file::FileSource;
