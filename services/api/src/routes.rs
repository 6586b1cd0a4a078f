//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;

use crate::{
    error::ServiceResult,
    middleware::{AuthUser, auth_middleware, optional_auth_middleware},
    models::{
        CreateUserRequest, FavoriteMovie, FavoriteMovieRequest, FullMovieResponse, LoginResult,
        MoviesFilter, OtpCodeIssued, PaginatedMovies, User, VerifyOtpRequest,
    },
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/otp/request/:mobile_number", get(request_otp_code))
        .route("/otp/verify/:mobile_number", post(verify_otp_code));

    let public_movie_routes = Router::new()
        .route("/:movie_id", get(get_movie_details))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    let movie_routes = Router::new()
        .route("/", get(get_movies))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .merge(public_movie_routes);

    let protected_user_routes = Router::new()
        .route("/profile", get(get_profile))
        .route(
            "/movies/favorites",
            post(add_favorite_movie).get(list_favorite_movies),
        )
        .route("/movies/favorites/:movie_id", delete(remove_favorite_movie))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let user_routes = Router::new()
        .route("/", post(create_account))
        .route("/:mobile_number", get(get_account))
        .merge(protected_user_routes);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/movies", movie_routes)
        .nest("/api/v1/user", user_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "movieshub-api"
    }))
}

/// Text a sign-in code to an existing account
pub async fn request_otp_code(
    State(state): State<AppState>,
    Path(mobile_number): Path<String>,
) -> ServiceResult<OtpCodeIssued> {
    state.auth_service.request_otp_code(&mobile_number).await
}

/// Exchange a texted code for a bearer token
pub async fn verify_otp_code(
    State(state): State<AppState>,
    Path(mobile_number): Path<String>,
    Json(payload): Json<VerifyOtpRequest>,
) -> ServiceResult<LoginResult> {
    state
        .auth_service
        .verify_otp_code(&mobile_number, payload)
        .await
}

/// List movies by type, page and language
pub async fn get_movies(
    State(state): State<AppState>,
    Query(filter): Query<MoviesFilter>,
) -> ServiceResult<PaginatedMovies> {
    state.movie_service.get_movies(filter).await
}

/// Movie details; annotated with the favorite flag for signed-in callers
pub async fn get_movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
    caller: Option<Extension<AuthUser>>,
) -> ServiceResult<FullMovieResponse> {
    let mobile_number = caller.map(|Extension(user)| user.mobile_number);
    state
        .movie_service
        .get_movie_details(movie_id, mobile_number.as_deref())
        .await
}

/// Register an account
pub async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ServiceResult<User> {
    state.user_service.create_account(payload).await
}

/// Account by mobile number
pub async fn get_account(
    State(state): State<AppState>,
    Path(mobile_number): Path<String>,
) -> ServiceResult<User> {
    state.user_service.get_account(&mobile_number).await
}

/// Account of the token holder
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ServiceResult<User> {
    state.user_service.get_account(&caller.mobile_number).await
}

/// Add a movie to the caller's favorites
pub async fn add_favorite_movie(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(payload): Json<FavoriteMovieRequest>,
) -> ServiceResult<FavoriteMovie> {
    state
        .user_service
        .add_favorite(&caller.mobile_number, payload)
        .await
}

/// The caller's favorites
pub async fn list_favorite_movies(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ServiceResult<Vec<FavoriteMovie>> {
    state
        .user_service
        .list_favorites(&caller.mobile_number)
        .await
}

/// Remove a movie from the caller's favorites
pub async fn remove_favorite_movie(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(movie_id): Path<i32>,
) -> ServiceResult<FavoriteMovie> {
    state
        .user_service
        .remove_favorite(&caller.mobile_number, movie_id)
        .await
}
