//! MoviesHub API service
//!
//! OTP sign-in over SMS, user accounts with a favorites list, and a movie
//! catalog proxied from The Movie Database.

pub mod clients;
pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use state::AppState;
