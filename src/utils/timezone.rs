use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    /// Render a UTC instant as wall-clock time in this zone.
    ///
    /// Named zones print their abbreviation for `%Z` ("EST"); the local zone
    /// only knows its offset.
    pub(crate) fn format(self, utc: DateTime<Utc>, fmt: &str) -> String {
        match self {
            Timezone::Local => utc.with_timezone(&Local).format(fmt).to_string(),
            Timezone::Named(tz) => utc.with_timezone(&tz).format(fmt).to_string(),
        }
    }
}
