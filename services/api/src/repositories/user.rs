//! User repositories: durable store and read-through cache

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use common::cache::CacheStore;
use sqlx::PgPool;
use tracing::info;

use super::CacheKeys;
use crate::models::User;

/// Durable user storage
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by mobile number
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<User>>;

    /// Insert a user; `false` when nothing was written
    async fn create(&self, user: &User) -> Result<bool>;
}

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<User>> {
        info!("Finding user by mobile number: {}", mobile_number);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, mobile_number, created_at, updated_at
            FROM users
            WHERE mobile_number = $1
            "#,
        )
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: &User) -> Result<bool> {
        info!("Creating user account: {}", user.mobile_number);

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, mobile_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (mobile_number) DO NOTHING
            "#,
        )
        .bind(&user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.mobile_number)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Cached copies of user records, expiring after the data TTL
#[derive(Clone)]
pub struct UserCacheRepository {
    cache: Arc<dyn CacheStore>,
    keys: CacheKeys,
    ttl_seconds: u64,
}

impl UserCacheRepository {
    pub fn new(cache: Arc<dyn CacheStore>, keys: CacheKeys, ttl_seconds: u64) -> Self {
        Self {
            cache,
            keys,
            ttl_seconds,
        }
    }

    pub async fn get(&self, mobile_number: &str) -> Result<Option<User>> {
        match self.cache.get(&self.keys.user(mobile_number)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn put(&self, user: &User) -> Result<()> {
        let value = serde_json::to_string(user)?;
        self.cache
            .set(
                &self.keys.user(&user.mobile_number),
                &value,
                Some(self.ttl_seconds),
            )
            .await
    }
}
