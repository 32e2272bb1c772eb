//! Saved-response source
//!
//! Reads `<dir>/<character>.json`, the body the statistics endpoint would
//! have returned. Used for offline runs.

use std::fs;
use std::path::PathBuf;

use crate::core::StatsResponse;
use crate::error::AppError;
use crate::source::{StatsSource, decode_response};

pub(crate) struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, character: &str) -> PathBuf {
        self.dir.join(format!("{}.json", character.to_lowercase()))
    }
}

impl StatsSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn display_name(&self) -> &'static str {
        "saved responses"
    }

    fn fetch(&self, character: &str) -> Result<StatsResponse, AppError> {
        let path = self.path_for(character);
        let body = fs::read_to_string(&path).map_err(|source| AppError::ReadFile {
            path: path.clone(),
            source,
        })?;
        Ok(decode_response(character, &body)?)
    }
}
