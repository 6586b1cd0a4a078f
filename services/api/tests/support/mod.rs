//! Common test utilities for API integration tests

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Result, bail};
use async_trait::async_trait;
use common::{CacheStore, MemoryCache};
use movieshub_api::{
    AppState,
    clients::{
        CatalogResponse, MovieCatalog, SmsSender, sms::HubtelSmsConfig, tmdb::TheMovieDbConfig,
    },
    config::{AppConfig, CacheConfig, ServerConfig},
    jwt::BearerTokenConfig,
    models::{CreateUserRequest, User, VerifyOtpRequest},
};

mod memory;

pub use memory::{InMemoryFavoriteMovieRepository, InMemoryUserRepository};

pub const MOBILE_NUMBER: &str = "0548015476";

/// SMS sender that captures (mobile number, content) pairs
#[derive(Default)]
pub struct RecordingSmsSender {
    pub sent: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl RecordingSmsSender {
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Last (prefix, code) texted to a number, parsed from "PREFIX-CODE"
    pub fn last_code(&self, mobile_number: &str) -> Option<(String, u32)> {
        let sent = self.sent.lock().unwrap();
        let (_, content) = sent.iter().rev().find(|(to, _)| to == mobile_number)?;
        let token = content
            .split_whitespace()
            .find(|word| word.contains('-') && word.len() > 5)?
            .trim_end_matches('.');
        let (prefix, code) = token.split_once('-')?;
        Some((prefix.to_string(), code.parse().ok()?))
    }
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send_sms(&self, mobile_number: &str, content: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            bail!("SMS gateway unavailable");
        }
        self.sent
            .lock()
            .unwrap()
            .push((mobile_number.to_string(), content.to_string()));
        Ok(())
    }
}

/// Movie catalog serving canned replies by path
#[derive(Default)]
pub struct StubCatalog {
    replies: Mutex<HashMap<String, CatalogResponse>>,
    pub requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl StubCatalog {
    pub fn reply(&self, path: &str, status: u16, body: serde_json::Value) {
        self.reply_raw(path, status, &body.to_string());
    }

    /// Canned reply with a body that need not be JSON
    pub fn reply_raw(&self, path: &str, status: u16, body: &str) {
        self.replies.lock().unwrap().insert(
            path.to_string(),
            CatalogResponse {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[async_trait]
impl MovieCatalog for StubCatalog {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<CatalogResponse> {
        self.requests.lock().unwrap().push((
            path.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));

        match self.replies.lock().unwrap().get(path) {
            Some(reply) => Ok(reply.clone()),
            None => bail!("connection refused"),
        }
    }
}

/// Cache shared with another client that deletes every key right after
/// this client reads it
///
/// Models a concurrent request winning the race for the same record.
pub struct ContendedCache {
    inner: Arc<MemoryCache>,
}

#[async_trait]
impl CacheStore for ContendedCache {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<()> {
        self.inner.set(key, value, ttl_seconds).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.inner.get(key).await?;
        if value.is_some() {
            self.inner.delete(key).await?;
        }
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.inner.delete(key).await
    }
}

/// In-memory wiring of the whole service
pub struct TestApp {
    pub state: AppState,
    pub config: AppConfig,
    pub cache: Arc<MemoryCache>,
    pub users: Arc<InMemoryUserRepository>,
    pub favorites: Arc<InMemoryFavoriteMovieRepository>,
    pub sms: Arc<RecordingSmsSender>,
    pub catalog: Arc<StubCatalog>,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        cache: CacheConfig {
            key_prefix: "movieshub".into(),
            otp_code_expiry_minutes: 5,
            data_expiry_days: 7,
        },
        bearer_token: BearerTokenConfig {
            key: "integration-test-signing-key".into(),
            issuer: "movieshub".into(),
            audience: "movieshub".into(),
        },
        sms: HubtelSmsConfig {
            base_url: "http://sms.invalid".into(),
            client_key: "key".into(),
            client_secret: "secret".into(),
            sender_id: "MoviesHub".into(),
        },
        tmdb: TheMovieDbConfig {
            base_url: "http://tmdb.invalid".into(),
            api_key: "key".into(),
        },
    }
}

impl TestApp {
    pub fn new() -> Self {
        let cache = Arc::new(MemoryCache::new());
        Self::with_cache_store(cache.clone(), cache)
    }

    /// Wiring over a [`ContendedCache`] in front of `self.cache`
    pub fn contended() -> Self {
        let cache = Arc::new(MemoryCache::new());
        let store = Arc::new(ContendedCache {
            inner: cache.clone(),
        });
        Self::with_cache_store(cache, store)
    }

    fn with_cache_store(cache: Arc<MemoryCache>, store: Arc<dyn CacheStore>) -> Self {
        let config = test_config();
        let users = Arc::new(InMemoryUserRepository::new());
        let favorites = Arc::new(InMemoryFavoriteMovieRepository::new());
        let sms = Arc::new(RecordingSmsSender::default());
        let catalog = Arc::new(StubCatalog::default());

        let state = AppState::new(
            &config,
            store,
            users.clone(),
            favorites.clone(),
            sms.clone(),
            catalog.clone(),
        )
        .expect("Failed to build app state");

        Self {
            state,
            config,
            cache,
            users,
            favorites,
            sms,
            catalog,
        }
    }

    pub async fn create_user(&self, mobile_number: &str) -> User {
        self.state
            .user_service
            .create_account(CreateUserRequest {
                first_name: "Kwame".into(),
                last_name: "Asante".into(),
                mobile_number: mobile_number.into(),
            })
            .await
            .expect("Failed to create user")
            .data
            .expect("Created user missing from response")
    }

    /// Request a code and read it back from the captured SMS
    pub async fn issue_code(&self, mobile_number: &str) -> VerifyOtpRequest {
        let issued = self
            .state
            .auth_service
            .request_otp_code(mobile_number)
            .await
            .expect("Failed to request OTP code")
            .data
            .expect("Issued code missing from response");
        let (prefix, code) = self
            .sms
            .last_code(mobile_number)
            .expect("No OTP code texted");
        assert_eq!(prefix, issued.prefix);

        VerifyOtpRequest {
            request_id: issued.request_id,
            prefix,
            code,
        }
    }

    /// Sign in and return a bearer token
    pub async fn login(&self, mobile_number: &str) -> String {
        let request = self.issue_code(mobile_number).await;
        self.state
            .auth_service
            .verify_otp_code(mobile_number, request)
            .await
            .expect("Failed to verify OTP code")
            .data
            .expect("Login result missing from response")
            .token
    }
}
