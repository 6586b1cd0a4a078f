use std::sync::Arc;

use anyhow::Result;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, health_check, init_pool},
    error::DatabaseError,
};
use movieshub_api::{
    AppState,
    clients::{HubtelSmsClient, TmdbClient, http_client},
    config::AppConfig,
    repositories::{PgFavoriteMovieRepository, PgUserRepository},
    routes,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting MoviesHub API service");

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    // Initialize cache
    let redis_config = RedisConfig::from_env()?;
    let redis = RedisPool::new(&redis_config).await?;
    if redis.health_check().await? {
        info!("Redis connection successful");
    } else {
        anyhow::bail!("Failed to connect to Redis");
    }

    let http = http_client()?;

    let app_state = AppState::new(
        &config,
        Arc::new(redis),
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgFavoriteMovieRepository::new(pool)),
        Arc::new(HubtelSmsClient::new(http.clone(), config.sms.clone())),
        Arc::new(TmdbClient::new(http, config.tmdb.clone())),
    )?;

    // Start the web server
    let app = routes::create_router(app_state);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("MoviesHub API listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
