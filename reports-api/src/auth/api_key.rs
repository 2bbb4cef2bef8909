//! Shared-secret authentication for the reports API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::header::AUTHORIZATION;
use shared::error::AppError;

use crate::state::AppState;

/// Middleware that compares the `Authorization` header with the configured
/// API key. Runs before any report query.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if is_valid_key(key, &state.api_key) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Unauthorized: invalid API key");
            Err(AppError::unauthorized())
        }
        None => {
            tracing::warn!(path = %request.uri().path(), "Unauthorized: missing API key");
            Err(AppError::unauthorized())
        }
    }
}

fn is_valid_key(presented: &str, expected: &str) -> bool {
    !presented.is_empty() && presented == expected
}
