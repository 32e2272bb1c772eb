//! Battle.net profile API source
//!
//! Token acquisition, authenticated GETs and the statistics endpoint.

mod auth;
mod client;
mod config;

pub(crate) use auth::Credentials;
pub(crate) use client::ApiClient;
pub(crate) use config::{ApiSettings, BattleNetSource};
