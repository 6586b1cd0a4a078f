//! Accounts and favorites with the database as system of record
//!
//! User records are served through a read-through cache. Favorites change on
//! every add and remove, so they are always read from the database.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    error::{ServiceError, ServiceResult},
    models::{CreateUserRequest, FavoriteMovie, FavoriteMovieRequest, User},
    repositories::{FavoriteMovieRepository, UserCacheRepository, UserRepository},
    response::BaseResponse,
    validation,
};

const USER_NOT_FOUND: &str = "User not found";
const USER_ALREADY_CREATED: &str = "User account already created";
const FAVORITE_NOT_FOUND: &str = "Favorite movie not found";
const FAVORITE_REMOVED: &str = "Movie removed successfully";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    user_cache: UserCacheRepository,
    favorites: Arc<dyn FavoriteMovieRepository>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        user_cache: UserCacheRepository,
        favorites: Arc<dyn FavoriteMovieRepository>,
    ) -> Self {
        Self {
            users,
            user_cache,
            favorites,
        }
    }

    /// Register an account; the mobile number is the dedup key
    pub async fn create_account(&self, request: CreateUserRequest) -> ServiceResult<User> {
        validation::validate_create_user(&request).map_err(ServiceError::BadRequest)?;

        let mobile_number = request.mobile_number.trim();
        if self.find_user(mobile_number).await?.is_some() {
            return Err(ServiceError::Conflict(USER_ALREADY_CREATED.to_string()));
        }

        let user = User::new(&request);
        let created = self.users.create(&user).await.map_err(|e| {
            error!(
                mobile_number = %mobile_number,
                payload = %serde_json::to_string(&request).unwrap_or_default(),
                "Failed to create user account: {}", e
            );
            ServiceError::InternalError
        })?;

        if !created {
            error!(mobile_number = %mobile_number, "User account was not persisted");
            return Err(ServiceError::DependencyError);
        }

        if let Err(e) = self.user_cache.put(&user).await {
            warn!(mobile_number = %mobile_number, "Failed to cache user account: {}", e);
        }

        info!(mobile_number = %mobile_number, "User account created");
        Ok(BaseResponse::created(user))
    }

    /// Cache-aside account lookup
    pub async fn get_account(&self, mobile_number: &str) -> ServiceResult<User> {
        self.find_user(mobile_number)
            .await?
            .map(BaseResponse::ok)
            .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.to_string()))
    }

    /// Favorite a movie for the caller
    ///
    /// Adding a movie that is already a favorite overwrites its details and
    /// keeps the stored id.
    pub async fn add_favorite(
        &self,
        mobile_number: &str,
        request: FavoriteMovieRequest,
    ) -> ServiceResult<FavoriteMovie> {
        let movie = FavoriteMovie::new(mobile_number, &request);
        let stored = self.favorites.add(&movie).await.map_err(|e| {
            error!(
                mobile_number = %mobile_number,
                payload = %serde_json::to_string(&request).unwrap_or_default(),
                "Failed to add favorite movie: {}", e
            );
            ServiceError::InternalError
        })?;

        let Some(stored) = stored else {
            error!(mobile_number = %mobile_number, movie_id = request.id, "Favorite movie was not persisted");
            return Err(ServiceError::DependencyError);
        };

        info!(mobile_number = %mobile_number, movie_id = stored.movie_id, "Favorite movie added");
        Ok(BaseResponse::created(stored))
    }

    /// Remove one of the caller's favorites by upstream movie id
    ///
    /// Returns the removed record; `NotFound` when the movie is not a favorite.
    pub async fn remove_favorite(
        &self,
        mobile_number: &str,
        movie_id: i32,
    ) -> ServiceResult<FavoriteMovie> {
        let existing = self
            .favorites
            .find(mobile_number, movie_id)
            .await
            .map_err(|e| {
                error!(mobile_number = %mobile_number, movie_id, "Failed to look up favorite movie: {}", e);
                ServiceError::InternalError
            })?
            .ok_or_else(|| ServiceError::NotFound(FAVORITE_NOT_FOUND.to_string()))?;

        let deleted = self.favorites.delete(&existing.id).await.map_err(|e| {
            error!(mobile_number = %mobile_number, movie_id, "Failed to remove favorite movie: {}", e);
            ServiceError::InternalError
        })?;

        if !deleted {
            error!(mobile_number = %mobile_number, movie_id, "Favorite movie was not deleted");
            return Err(ServiceError::DependencyError);
        }

        info!(mobile_number = %mobile_number, movie_id, "Favorite movie removed");
        Ok(BaseResponse::ok_with_message(existing, FAVORITE_REMOVED))
    }

    /// The caller's favorites; empty when the user has none
    pub async fn list_favorites(&self, mobile_number: &str) -> ServiceResult<Vec<FavoriteMovie>> {
        let movies = self.favorites.list(mobile_number).await.map_err(|e| {
            error!(mobile_number = %mobile_number, "Failed to list favorite movies: {}", e);
            ServiceError::InternalError
        })?;

        Ok(BaseResponse::ok(movies))
    }

    /// Whether the movie is among the caller's favorites
    pub async fn is_favorite(&self, mobile_number: &str, movie_id: i32) -> anyhow::Result<bool> {
        self.favorites.is_favorite(mobile_number, movie_id).await
    }

    async fn find_user(&self, mobile_number: &str) -> Result<Option<User>, ServiceError> {
        match self.user_cache.get(mobile_number).await {
            Ok(Some(user)) => return Ok(Some(user)),
            Ok(None) => {}
            Err(e) => warn!(mobile_number = %mobile_number, "User cache read failed: {}", e),
        }

        let user = self
            .users
            .find_by_mobile_number(mobile_number)
            .await
            .map_err(|e| {
                error!(mobile_number = %mobile_number, "Failed to look up user account: {}", e);
                ServiceError::InternalError
            })?;

        if let Some(user) = &user {
            if let Err(e) = self.user_cache.put(user).await {
                warn!(mobile_number = %mobile_number, "Failed to cache user account: {}", e);
            }
        }

        Ok(user)
    }
}
