/*
 * Responsibility
 * - Render a successful handler result to the wire
 * - No-content / null payloads go out with an empty body
 */
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// `{"id": "..."}` returned by create routes.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: String,
}

/// `{"token": "..."}` returned by the token route.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Serialize `payload` at `status`.
///
/// The body is suppressed for 204, and for 200 when the payload serializes to `null`
/// (a lookup that found nothing answers with an empty 200, not the literal `null`).
pub fn respond<T: Serialize>(payload: &T, status: StatusCode) -> Result<Response, AppError> {
    let body = serde_json::to_vec(payload).map_err(AppError::internal)?;

    if status == StatusCode::NO_CONTENT || (status == StatusCode::OK && body == b"null") {
        return Ok(status.into_response());
    }

    // Bytes go out as serialized, so struct fields keep their declared order.
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Empty 200, used by update / delete routes.
pub fn ok() -> Result<Response, AppError> {
    respond(&(), StatusCode::OK)
}
