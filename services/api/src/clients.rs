//! Outbound HTTP clients: SMS gateway and movie catalog

pub mod sms;
pub mod tmdb;

use std::time::Duration;

use anyhow::{Context, Result};

pub use sms::{HubtelSmsClient, SmsSender};
pub use tmdb::{CatalogResponse, MovieCatalog, TmdbClient};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client for outbound calls
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}
