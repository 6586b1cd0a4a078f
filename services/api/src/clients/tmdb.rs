//! Movie catalog client for The Movie Database API
//!
//! Replies come back as raw JSON bodies tagged with the upstream status so
//! callers can decide per payload what a failure means.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

/// TMDB API settings
#[derive(Debug, Clone, Deserialize)]
pub struct TheMovieDbConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Raw upstream reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResponse {
    pub status: u16,
    pub body: String,
}

impl CatalogResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body, or `None` when the reply failed or does not parse
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        if !self.is_success() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }
}

/// Read access to the upstream movie catalog
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// GET `path` (relative to the API root) with extra query parameters
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<CatalogResponse>;
}

#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    config: TheMovieDbConfig,
}

impl TmdbClient {
    pub fn new(http: reqwest::Client, config: TheMovieDbConfig) -> Self {
        Self { http, config }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<CatalogResponse> {
        debug!(path = %path, "Fetching from movie catalog");

        let response = self
            .http
            .get(self.url(path))
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(CatalogResponse { status, body })
    }
}
