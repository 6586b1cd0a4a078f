//! Standard response envelope

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

const DEFAULT_OK_MESSAGE: &str = "Retrieved successfully";
const DEFAULT_CREATED_MESSAGE: &str = "Created successfully";

/// Envelope returned by every endpoint
///
/// `code` mirrors the HTTP status of the response; `data` is `null` on
/// failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::ok_with_message(data, DEFAULT_OK_MESSAGE)
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            code: StatusCode::CREATED.as_u16(),
            message: DEFAULT_CREATED_MESSAGE.to_string(),
            data: Some(data),
        }
    }

    pub fn from_error(error: &ServiceError) -> Self {
        Self {
            code: error.status().as_u16(),
            message: error.to_string(),
            data: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for BaseResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
