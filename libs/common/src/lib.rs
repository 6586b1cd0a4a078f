//! Common library for the MoviesHub services
//!
//! This crate provides shared infrastructure used by the API service:
//! PostgreSQL connectivity, the key-value cache port with its Redis
//! implementation, and database error types. The `test-util` feature adds
//! `MemoryCache`, an in-process cache for test suites.
//!
//! ```rust,no_run
//! use common::cache::{CacheStore, RedisConfig, RedisPool};
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     assert!(health_check(&pool).await?);
//!
//!     let redis = RedisPool::new(&RedisConfig::from_env()?).await?;
//!     redis.set("movieshub:ping", "pong", Some(10)).await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod database;
pub mod error;

pub use cache::CacheStore;

#[cfg(any(test, feature = "test-util"))]
pub use cache::MemoryCache;
