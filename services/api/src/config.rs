//! Application configuration
//!
//! Built once at start-up and handed to each component. Values come from
//! built-in defaults, an optional `config/movieshub.*` file and `MOVIESHUB_`
//! prefixed environment variables, in increasing priority. Nested keys use a
//! double underscore, e.g. `MOVIESHUB_CACHE__OTP_CODE_EXPIRY_MINUTES=10`.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::{
    clients::{sms::HubtelSmsConfig, tmdb::TheMovieDbConfig},
    jwt::BearerTokenConfig,
};

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cache namespace and expiry settings
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Namespace prepended to every cache key
    pub key_prefix: String,
    /// Lifetime of an issued OTP code
    pub otp_code_expiry_minutes: u64,
    /// Lifetime of cached user and favorites data
    pub data_expiry_days: u64,
}

impl CacheConfig {
    pub fn otp_code_ttl_seconds(&self) -> u64 {
        self.otp_code_expiry_minutes * 60
    }

    pub fn data_ttl_seconds(&self) -> u64 {
        self.data_expiry_days * 24 * 60 * 60
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub bearer_token: BearerTokenConfig,
    pub sms: HubtelSmsConfig,
    pub tmdb: TheMovieDbConfig,
}

impl AppConfig {
    /// Load configuration from defaults, optional file and environment
    pub fn from_env() -> Result<Self> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("cache.key_prefix", "movieshub")?
            .set_default("cache.otp_code_expiry_minutes", 5)?
            .set_default("cache.data_expiry_days", 7)?
            .set_default("bearer_token.key", "")?
            .set_default("bearer_token.issuer", "movieshub")?
            .set_default("bearer_token.audience", "movieshub")?
            .set_default("sms.base_url", "https://smsc.hubtel.com/v1/messages/send")?
            .set_default("sms.client_key", "")?
            .set_default("sms.client_secret", "")?
            .set_default("sms.sender_id", "MoviesHub")?
            .set_default("tmdb.base_url", "https://api.themoviedb.org/3")?
            .set_default("tmdb.api_key", "")?
            .add_source(File::with_name("config/movieshub").required(false))
            .add_source(
                Environment::with_prefix("MOVIESHUB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_app_config_defaults() {
        let config = AppConfig::from_env().unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.cache.key_prefix, "movieshub");
        assert_eq!(config.cache.otp_code_expiry_minutes, 5);
        assert_eq!(config.cache.otp_code_ttl_seconds(), 300);
        assert_eq!(config.cache.data_ttl_seconds(), 7 * 86_400);
        assert_eq!(config.bearer_token.issuer, "movieshub");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    #[serial]
    fn test_app_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("MOVIESHUB_CACHE__OTP_CODE_EXPIRY_MINUTES", "10");
            std::env::set_var("MOVIESHUB_BEARER_TOKEN__KEY", "a-very-secret-signing-key");
            std::env::set_var("MOVIESHUB_SERVER__PORT", "8080");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.cache.otp_code_expiry_minutes, 10);
        assert_eq!(config.bearer_token.key, "a-very-secret-signing-key");
        assert_eq!(config.server.port, 8080);

        unsafe {
            std::env::remove_var("MOVIESHUB_CACHE__OTP_CODE_EXPIRY_MINUTES");
            std::env::remove_var("MOVIESHUB_BEARER_TOKEN__KEY");
            std::env::remove_var("MOVIESHUB_SERVER__PORT");
        }
    }
}
