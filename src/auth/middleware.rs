use crate::auth::jwt::AuthService;
use crate::types::{AppError, Claims};
use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Bearer-token gate for protected routes.
///
/// Missing header and failed verification are both terminal for the
/// request; there is no fallback.
pub async fn auth_middleware(
    auth_service: Arc<AuthService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Auth("Access denied. No token provided.".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Invalid token".to_string()))?;

    let claims = auth_service
        .verify_token(token)
        .map_err(|_| AppError::Auth("Invalid token".to_string()))?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

// Extractor for claims
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Extracts the authenticated user's claims placed by [`auth_middleware`].
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Auth("Access denied. No token provided.".to_string()))
    }
}
