//! OAuth client-credentials flow for the Battle.net API

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ApiError;

pub(crate) const CLIENT_ID_VAR: &str = "BNET_CLIENT_ID";
pub(crate) const CLIENT_SECRET_VAR: &str = "BNET_CLIENT_SECRET";

#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
}

impl Credentials {
    /// Process environment first, then values from a `.env` file
    pub(crate) fn from_env(dotenv: &HashMap<String, String>) -> Result<Self, ApiError> {
        Self::resolve(|key| std::env::var(key).ok(), dotenv)
    }

    fn resolve<F>(lookup: F, dotenv: &HashMap<String, String>) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| dotenv.get(key).cloned())
                .filter(|v| !v.trim().is_empty())
        };
        match (get(CLIENT_ID_VAR), get(CLIENT_SECRET_VAR)) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id,
                client_secret,
            }),
            _ => Err(ApiError::MissingCredentials),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub(super) fn token_url(region: &str) -> String {
    format!("https://{}.battle.net/oauth/token", region.to_lowercase())
}

/// Exchange client credentials for a bearer token
pub(super) fn fetch_token(
    agent: &ureq::Agent,
    region: &str,
    credentials: &Credentials,
) -> Result<String, ApiError> {
    let url = token_url(region);
    let response = agent
        .post(&url)
        .send_form([
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ])
        .map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Token(format!("{url} returned HTTP {}", status.as_u16())));
    }

    let token: TokenResponse = response
        .into_body()
        .read_json()
        .map_err(|err| ApiError::Token(format!("unreadable token response: {err}")))?;
    Ok(token.access_token)
}
