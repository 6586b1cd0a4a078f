//! Favorite movie model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::new_id;

/// A movie on a user's favorites list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteMovie {
    pub id: String,
    pub movie_id: i32,
    pub user_mobile_number: String,
    pub title: String,
    pub total_vote_count: f64,
    pub image_url: String,
    pub average_rating: f64,
}

impl FavoriteMovie {
    pub fn new(mobile_number: &str, request: &FavoriteMovieRequest) -> Self {
        Self {
            id: new_id(),
            movie_id: request.id,
            user_mobile_number: mobile_number.to_string(),
            title: request.title.clone(),
            total_vote_count: request.total_vote_count,
            image_url: request.image_url.clone(),
            average_rating: request.average_rating,
        }
    }
}

/// Movie to add to the caller's favorites; `id` is the upstream movie id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteMovieRequest {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub total_vote_count: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub average_rating: f64,
}
