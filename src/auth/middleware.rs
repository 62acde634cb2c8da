use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Gate applied to every protected route. Expects `Authorization: Bearer
/// <token>`; on success the decoded claims are attached to the request
/// extensions for downstream handlers. No database access here.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(AppError::MissingToken)?;

    let claims = state
        .jwt
        .verify(token)
        .map_err(|_| AppError::SessionExpired)?;

    debug!("authenticated request from {}", claims.username);
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
