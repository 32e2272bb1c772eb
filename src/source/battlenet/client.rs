//! Authenticated HTTP client
//!
//! Holds a bearer token and performs GET requests with bounded retries.
//! HTTP status codes are surfaced to the caller rather than turned into
//! transport errors.

use std::time::Duration;

use crate::error::ApiError;

use super::auth::{Credentials, fetch_token};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const FETCH_RETRIES: usize = 3;
const RETRY_BACKOFF_MS: u64 = 250;

#[derive(Debug)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

impl HttpResponse {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub(crate) struct ApiClient {
    agent: ureq::Agent,
    token: String,
}

impl ApiClient {
    /// Build an agent and obtain a token for `region`
    pub(crate) fn connect(region: &str, credentials: &Credentials) -> Result<Self, ApiError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();
        let token = fetch_token(&agent, region, credentials)?;
        Ok(Self { agent, token })
    }

    /// GET `url`; transport failures and 5xx answers are retried
    pub(crate) fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let last_attempt = attempt >= FETCH_RETRIES;
            let outcome = self
                .agent
                .get(url)
                .header("Authorization", format!("Bearer {}", self.token))
                .call();

            match outcome {
                Ok(response) if response.status().is_server_error() && !last_attempt => {
                    log::debug!(
                        "{url} returned HTTP {} (attempt {attempt}/{FETCH_RETRIES})",
                        response.status().as_u16()
                    );
                }
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.into_body().read_to_string().map_err(|source| {
                        ApiError::Transport {
                            url: url.to_string(),
                            source,
                        }
                    })?;
                    return Ok(HttpResponse { status, body });
                }
                Err(err) if !last_attempt => {
                    log::debug!("Request to {url} failed: {err} (attempt {attempt}/{FETCH_RETRIES})");
                }
                Err(source) => {
                    return Err(ApiError::Transport {
                        url: url.to_string(),
                        source,
                    });
                }
            }

            std::thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64));
        }
    }
}
