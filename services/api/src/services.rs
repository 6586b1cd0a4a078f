//! Application services: each operation returns a [`ServiceResult`]
//!
//! [`ServiceResult`]: crate::error::ServiceResult

pub mod auth;
pub mod movies;
pub mod user;

pub use auth::AuthService;
pub use movies::MovieService;
pub use user::UserService;
