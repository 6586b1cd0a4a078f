//! API models for stored records and request and response payloads

pub mod favorite;
pub mod movie;
pub mod otp;
pub mod user;

pub use favorite::{FavoriteMovie, FavoriteMovieRequest};
pub use movie::{FullMovieResponse, MovieListKind, MoviesFilter, PaginatedMovies};
pub use otp::{LoginResult, OtpCode, OtpCodeIssued, VerifyOtpRequest};
pub use user::{CreateUserRequest, User};

/// Fresh opaque identifier in compact (hyphen-free) form
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
