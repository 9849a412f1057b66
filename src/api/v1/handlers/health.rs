/*
 * Responsibility
 * - GET /health (疎通用, /api/v1 の外なので access pipeline を通らない)
 */
use axum::{http::StatusCode, response::Response};
use serde::Serialize;

use crate::{error::AppError, response};

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

pub async fn health() -> Result<Response, AppError> {
    response::respond(&Health { status: "ok" }, StatusCode::OK)
}
