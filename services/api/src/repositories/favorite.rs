//! Favorite movie repository over PostgreSQL

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::FavoriteMovie;

/// Durable favorites storage, unique per (mobile number, movie id)
#[async_trait]
pub trait FavoriteMovieRepository: Send + Sync {
    /// Insert or overwrite the user's entry for the movie and return the
    /// stored record; `None` when nothing was written
    async fn add(&self, movie: &FavoriteMovie) -> Result<Option<FavoriteMovie>>;

    /// Delete a favorite by id; `false` when nothing was deleted
    async fn delete(&self, id: &str) -> Result<bool>;

    /// All favorites owned by a mobile number
    async fn list(&self, mobile_number: &str) -> Result<Vec<FavoriteMovie>>;

    /// The user's entry for a movie, if any
    async fn find(&self, mobile_number: &str, movie_id: i32) -> Result<Option<FavoriteMovie>>;

    async fn is_favorite(&self, mobile_number: &str, movie_id: i32) -> Result<bool> {
        Ok(self.find(mobile_number, movie_id).await?.is_some())
    }
}

/// PostgreSQL favorites repository
#[derive(Clone)]
pub struct PgFavoriteMovieRepository {
    pool: PgPool,
}

impl PgFavoriteMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteMovieRepository for PgFavoriteMovieRepository {
    async fn add(&self, movie: &FavoriteMovie) -> Result<Option<FavoriteMovie>> {
        info!(
            "Adding movie {} to favorites of {}",
            movie.movie_id, movie.user_mobile_number
        );

        let stored = sqlx::query_as::<_, FavoriteMovie>(
            r#"
            INSERT INTO favorite_movies
                (id, movie_id, user_mobile_number, title, total_vote_count, image_url, average_rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_mobile_number, movie_id) DO UPDATE SET
                title = EXCLUDED.title,
                total_vote_count = EXCLUDED.total_vote_count,
                image_url = EXCLUDED.image_url,
                average_rating = EXCLUDED.average_rating
            RETURNING id, movie_id, user_mobile_number, title, total_vote_count, image_url, average_rating
            "#,
        )
        .bind(&movie.id)
        .bind(movie.movie_id)
        .bind(&movie.user_mobile_number)
        .bind(&movie.title)
        .bind(movie.total_vote_count)
        .bind(&movie.image_url)
        .bind(movie.average_rating)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM favorite_movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, mobile_number: &str) -> Result<Vec<FavoriteMovie>> {
        let movies = sqlx::query_as::<_, FavoriteMovie>(
            r#"
            SELECT id, movie_id, user_mobile_number, title, total_vote_count, image_url, average_rating
            FROM favorite_movies
            WHERE user_mobile_number = $1
            ORDER BY title
            "#,
        )
        .bind(mobile_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn find(&self, mobile_number: &str, movie_id: i32) -> Result<Option<FavoriteMovie>> {
        let movie = sqlx::query_as::<_, FavoriteMovie>(
            r#"
            SELECT id, movie_id, user_mobile_number, title, total_vote_count, image_url, average_rating
            FROM favorite_movies
            WHERE user_mobile_number = $1 AND movie_id = $2
            "#,
        )
        .bind(mobile_number)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn is_favorite(&self, mobile_number: &str, movie_id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorite_movies WHERE user_mobile_number = $1 AND movie_id = $2)",
        )
        .bind(mobile_number)
        .bind(movie_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
