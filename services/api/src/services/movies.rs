//! Movie listing and the composite details view

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{error, warn};

use crate::{
    clients::{CatalogResponse, MovieCatalog},
    error::{ServiceError, ServiceResult},
    models::{
        FullMovieResponse, MovieListKind, MoviesFilter, PaginatedMovies,
        movie::{MovieCredits, MovieDetails, MovieReviews, MovieSummary, MovieVideos},
    },
    response::BaseResponse,
    services::UserService,
};

const MOVIE_NOT_FOUND: &str = "Movie not found";
const SAMPLE_SIZE: usize = 10;

#[derive(Clone)]
pub struct MovieService {
    catalog: Arc<dyn MovieCatalog>,
    users: UserService,
}

impl MovieService {
    pub fn new(catalog: Arc<dyn MovieCatalog>, users: UserService) -> Self {
        Self { catalog, users }
    }

    /// One page of a catalog listing
    ///
    /// A failed, non-2xx or undecodable upstream reply is a dependency error.
    pub async fn get_movies(&self, filter: MoviesFilter) -> ServiceResult<PaginatedMovies> {
        let kind = MovieListKind::parse(filter.kind.as_deref());
        let query = [
            ("language", filter.language.clone()),
            ("page", filter.page.to_string()),
        ];

        let reply = self
            .catalog
            .get(kind.path(), &query)
            .await
            .map_err(|e| {
                error!(path = kind.path(), "Movie catalog request failed: {}", e);
                ServiceError::DependencyError
            })?;

        if !reply.is_success() {
            error!(path = kind.path(), status = reply.status, "Movie catalog returned an error");
            return Err(ServiceError::DependencyError);
        }

        let movies = serde_json::from_str(&reply.body).map_err(|e| {
            error!(path = kind.path(), "Failed to decode movie list: {}", e);
            ServiceError::DependencyError
        })?;

        Ok(BaseResponse::ok(movies))
    }

    /// Assemble details, credits, reviews, videos and two sampled lists
    ///
    /// The six upstream calls run concurrently and are all awaited; only a
    /// failed details call fails the whole view. `mobile_number` is the
    /// authenticated caller, if any, and drives the favorite flag.
    pub async fn get_movie_details(
        &self,
        movie_id: u64,
        mobile_number: Option<&str>,
    ) -> ServiceResult<FullMovieResponse> {
        let base = format!("movie/{}", movie_id);
        let credits_path = format!("{}/credits", base);
        let reviews_path = format!("{}/reviews", base);
        let videos_path = format!("{}/videos", base);
        let similar_path = format!("{}/similar", base);
        let recommended_path = format!("{}/recommendations", base);

        let (details, credits, reviews, videos, similar, recommended) = tokio::join!(
            self.fetch(&base),
            self.fetch(&credits_path),
            self.fetch(&reviews_path),
            self.fetch(&videos_path),
            self.fetch(&similar_path),
            self.fetch(&recommended_path),
        );

        let movie: MovieDetails = details
            .and_then(|reply| reply.decode())
            .ok_or_else(|| ServiceError::NotFound(MOVIE_NOT_FOUND.to_string()))?;

        let similar_movies = similar
            .and_then(|reply| reply.decode::<PaginatedMovies>())
            .map(|page| sample_movies(page.results, SAMPLE_SIZE))
            .unwrap_or_default();
        let recommended_movies = recommended
            .and_then(|reply| reply.decode::<PaginatedMovies>())
            .map(|page| sample_movies(page.results, SAMPLE_SIZE))
            .unwrap_or_default();

        let is_favorite_movie = match mobile_number {
            Some(mobile_number) => self.is_favorite(mobile_number, movie.id).await,
            None => false,
        };

        Ok(BaseResponse::ok(FullMovieResponse {
            movie,
            similar_movies,
            recommended_movies,
            credits: credits.and_then(|reply| reply.decode::<MovieCredits>()),
            reviews: reviews.and_then(|reply| reply.decode::<MovieReviews>()),
            videos: videos.and_then(|reply| reply.decode::<MovieVideos>()),
            is_favorite_movie,
        }))
    }

    async fn fetch(&self, path: &str) -> Option<CatalogResponse> {
        match self.catalog.get(path, &[]).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                error!(path = %path, "Movie catalog request failed: {}", e);
                None
            }
        }
    }

    async fn is_favorite(&self, mobile_number: &str, movie_id: i64) -> bool {
        let Ok(movie_id) = i32::try_from(movie_id) else {
            return false;
        };

        self.users
            .is_favorite(mobile_number, movie_id)
            .await
            .unwrap_or_else(|e| {
                warn!(mobile_number = %mobile_number, movie_id, "Favorite lookup failed: {}", e);
                false
            })
    }
}

/// Uniformly shuffle and keep at most `count` movies
pub fn sample_movies(mut movies: Vec<MovieSummary>, count: usize) -> Vec<MovieSummary> {
    movies.shuffle(&mut rand::thread_rng());
    movies.truncate(count);
    movies
}
