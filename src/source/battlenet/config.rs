//! Battle.net data source configuration
//!
//! Defines the BattleNetSource implementation of the StatsSource trait.

use crate::core::StatsResponse;
use crate::error::{ApiError, AppError};
use crate::source::{StatsSource, decode_response};

use super::client::ApiClient;

/// Where and how to query the profile API
#[derive(Debug, Clone)]
pub(crate) struct ApiSettings {
    pub(crate) region: String,
    pub(crate) realm: String,
    pub(crate) locale: String,
}

pub(crate) struct BattleNetSource {
    client: ApiClient,
    settings: ApiSettings,
}

impl BattleNetSource {
    pub(crate) fn new(client: ApiClient, settings: ApiSettings) -> Self {
        Self { client, settings }
    }
}

impl StatsSource for BattleNetSource {
    fn name(&self) -> &'static str {
        "battlenet"
    }

    fn display_name(&self) -> &'static str {
        "Battle.net"
    }

    fn fetch(&self, character: &str) -> Result<StatsResponse, AppError> {
        let url = statistics_url(&self.settings, character);
        let response = self.client.get(&url)?;
        if !response.is_success() {
            return Err(ApiError::Status {
                url,
                status: response.status,
            }
            .into());
        }
        Ok(decode_response(character, &response.body)?)
    }
}

pub(super) fn statistics_url(settings: &ApiSettings, character: &str) -> String {
    let region = settings.region.to_lowercase();
    format!(
        "https://{region}.api.blizzard.com/profile/wow/character/{}/{}/achievements/statistics?namespace=profile-{region}&locale={}",
        realm_slug(&settings.realm),
        urlencoding::encode(&character.to_lowercase()),
        settings.locale,
    )
}

/// "Aerie Peak" -> "aerie-peak", "Kel'Thuzad" -> "kelthuzad"
fn realm_slug(realm: &str) -> String {
    let slug: String = realm
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '\'')
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    urlencoding::encode(&slug).into_owned()
}
