//! Failure taxonomy for the API service
//!
//! Expected failures travel as [`ServiceError`] values and are rendered as
//! the standard response envelope. Unexpected infrastructure errors are
//! logged where they happen and collapse into [`ServiceError::InternalError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::BaseResponse;

pub const DEPENDENCY_ERROR_MESSAGE: &str = "An error occurred, try again later";
pub const INTERNAL_ERROR_MESSAGE: &str = "Something bad happened, try again later";

/// Custom error type for the API service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Resource absent
    #[error("{0}")]
    NotFound(String),

    /// Duplicate creation
    #[error("{0}")]
    Conflict(String),

    /// Caller-supplied data is invalid
    #[error("{0}")]
    BadRequest(String),

    /// A downstream store or service did not report success
    #[error("An error occurred, try again later")]
    DependencyError,

    /// Unexpected failure anywhere in a flow
    #[error("Something bad happened, try again later")]
    InternalError,

    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,
}

impl ServiceError {
    /// HTTP status mirrored into the envelope `code`
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::DependencyError => StatusCode::FAILED_DEPENDENCY,
            ServiceError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        BaseResponse::<()>::from_error(&self).into_response()
    }
}

/// Result of a service operation: a success envelope or a typed failure
pub type ServiceResult<T> = Result<BaseResponse<T>, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::NotFound("User not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Conflict("dup".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::DependencyError.status().as_u16(), 424);
        assert_eq!(ServiceError::InternalError.status().as_u16(), 500);
        assert_eq!(ServiceError::Unauthorized.status().as_u16(), 401);
    }

    #[test]
    fn test_messages_do_not_leak_internals() {
        assert_eq!(
            ServiceError::DependencyError.to_string(),
            DEPENDENCY_ERROR_MESSAGE
        );
        assert_eq!(ServiceError::InternalError.to_string(), INTERNAL_ERROR_MESSAGE);
        assert_eq!(
            ServiceError::NotFound("User not found".into()).to_string(),
            "User not found"
        );
    }
}
