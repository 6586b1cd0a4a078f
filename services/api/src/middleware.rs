//! Bearer token middleware

use axum::{
    RequestPartsExt,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::warn;

use crate::{error::ServiceError, models::User, state::AppState};

/// Authenticated caller, taken from the token claims
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub mobile_number: String,
    pub user: User,
}

/// Require a valid bearer token
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let (mut parts, body) = req.into_parts();

    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| ServiceError::Unauthorized)?;

    let user = authenticate(&state, bearer.token()).ok_or(ServiceError::Unauthorized)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Attach the caller when a valid bearer token is present
///
/// Anonymous requests and requests with a bad token pass through without an
/// [`AuthUser`].
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let user = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .ok()
        .and_then(|TypedHeader(Authorization(bearer))| authenticate(&state, bearer.token()));

    let mut req = Request::from_parts(parts, body);
    if let Some(user) = user {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

fn authenticate(state: &AppState, token: &str) -> Option<AuthUser> {
    match state.token_service.validate_token(token) {
        Ok(claims) => Some(AuthUser {
            mobile_number: claims.sub,
            user: claims.user,
        }),
        Err(e) => {
            warn!("Failed to validate token: {}", e);
            None
        }
    }
}
