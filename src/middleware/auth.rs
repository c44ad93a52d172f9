//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::{roles, API_KEY_HEADER, API_KEY_HEADER_ALIAS},
    error::AppError,
    services::AuthService,
    state::AppState,
};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub role: Option<String>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(roles::ADMIN)
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Shared API key guard for public endpoints
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let provided = headers
        .get(API_KEY_HEADER)
        .or_else(|| headers.get(API_KEY_HEADER_ALIAS))
        .and_then(|h| h.to_str().ok());

    if let Err(e) = AuthService::verify_api_key(provided, &state.config().auth.api_key) {
        debug!(path = %request.uri().path(), error = %e, "API key rejected");
        return Err(e);
    }

    Ok(next.run(request).await)
}

/// Bearer token middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        debug!(path = %path, "Auth failed: No Authorization header");
        return Err(AppError::Unauthorized);
    };

    let token = AuthService::bearer_token(auth_header).inspect_err(|_| {
        debug!(path = %path, "Auth failed: expected 'Bearer <token>'");
    })?;

    let claims = AuthService::verify_token(token, &state.config().auth.jwt_secret)
        .inspect_err(|e| debug!(path = %path, error = ?e, "Auth failed: token verification"))?;

    let user = AuthenticatedUser {
        role: claims.role().map(str::to_string),
        id: claims.sub,
    };

    debug!(path = %path, user_id = %user.id, role = ?user.role, "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
