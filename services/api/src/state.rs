//! Application state shared across handlers

use std::sync::Arc;

use anyhow::Result;
use common::cache::CacheStore;

use crate::{
    clients::{MovieCatalog, SmsSender},
    config::AppConfig,
    jwt::TokenService,
    repositories::{
        CacheKeys, FavoriteMovieRepository, OtpCodeRepository, UserCacheRepository,
        UserRepository,
    },
    services::{AuthService, MovieService, UserService},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub movie_service: MovieService,
    pub token_service: TokenService,
}

impl AppState {
    /// Wire services over the given stores and outbound clients
    pub fn new(
        config: &AppConfig,
        cache: Arc<dyn CacheStore>,
        users: Arc<dyn UserRepository>,
        favorites: Arc<dyn FavoriteMovieRepository>,
        sms: Arc<dyn SmsSender>,
        catalog: Arc<dyn MovieCatalog>,
    ) -> Result<Self> {
        let keys = CacheKeys::new(config.cache.key_prefix.clone());
        let data_ttl = config.cache.data_ttl_seconds();

        let token_service = TokenService::new(config.bearer_token.clone())?;

        let user_service = UserService::new(
            users,
            UserCacheRepository::new(cache.clone(), keys.clone(), data_ttl),
            favorites,
        );

        let auth_service = AuthService::new(
            user_service.clone(),
            OtpCodeRepository::new(cache, keys, config.cache.otp_code_ttl_seconds()),
            sms,
            token_service.clone(),
            config.cache.otp_code_expiry_minutes,
        );

        let movie_service = MovieService::new(catalog, user_service.clone());

        Ok(Self {
            auth_service,
            user_service,
            movie_service,
            token_service,
        })
    }
}
