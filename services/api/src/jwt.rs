//! Bearer token minting and validation
//!
//! Tokens are HS256-signed and carry the full user record as a custom
//! `user` claim next to the mobile number in `sub`, so resource handlers can
//! identify the caller without a database round trip. The embedded profile
//! may go stale if the account changes during the 12 hour lifetime.

use anyhow::{Result, bail};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::User;

const TOKEN_LIFETIME_HOURS: i64 = 12;
const NOT_BEFORE_SKEW_MILLIS: i64 = 30;

/// Token signing settings
#[derive(Debug, Clone, Deserialize)]
pub struct BearerTokenConfig {
    /// Symmetric HMAC-SHA256 secret
    pub key: String,
    pub issuer: String,
    pub audience: String,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Mobile number of the account
    pub sub: String,
    /// Embedded account record
    pub user: User,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Freshly minted token
#[derive(Debug, Clone)]
pub struct TokenResponse {
    pub bearer_token: String,
    /// Expiry as unix seconds
    pub expiry: i64,
}

/// Token service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: BearerTokenConfig,
}

impl TokenService {
    /// Initialize the token service; an empty key or issuer is rejected
    pub fn new(config: BearerTokenConfig) -> Result<Self> {
        if config.key.trim().is_empty() {
            bail!("Bearer token signing key is not configured");
        }
        if config.issuer.trim().is_empty() {
            bail!("Bearer token issuer is not configured");
        }

        let encoding_key = EncodingKey::from_secret(config.key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.key.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);

        Ok(TokenService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Mint a token for a user
    pub fn generate_token(&self, user: &User) -> Result<TokenResponse> {
        let now = Utc::now();
        let not_before = now - Duration::milliseconds(NOT_BEFORE_SKEW_MILLIS);
        let expiry = now + Duration::hours(TOKEN_LIFETIME_HOURS);

        let claims = Claims {
            sub: user.mobile_number.clone(),
            user: user.clone(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            nbf: not_before.timestamp(),
            exp: expiry.timestamp(),
        };

        let bearer_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(TokenResponse {
            bearer_token,
            expiry: claims.exp,
        })
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
