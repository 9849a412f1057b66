/*
 * Responsibility
 * - The one error type every stage returns (AppError)
 * - IntoResponse: the single place an error is rendered to the wire
 * - Declared variants expose their reason; Internal never does
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

/// Message shown for any fault that was not deliberately declared.
pub const INTERNAL_MESSAGE: &str = "Something went wrong, we are aware of the problem";

/// Message heading a validation failure body.
pub const VALIDATION_MESSAGE: &str = "Validation failed";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub message: &'static str,
    pub errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Wrong authorization header format")]
    AuthHeader,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Wrong basic authorization header format")]
    BasicAuth,
    #[error("Invalid username or password")]
    BadCredentials,
    #[error("Permission denied")]
    Denied,
    #[error("Unable to decode JSON: {0}")]
    Decode(String),
    #[error("Validation error")]
    Validation(Vec<String>),
    #[error("ID is not in the correct form")]
    InvalidId,
    #[error("No rows affected")]
    NoAffect,
    // Distinct username/email conflicts reveal which one is registered.
    #[error("username is already taken")]
    UsernameExists,
    #[error("email is already taken")]
    EmailExists,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthHeader
            | AppError::InvalidToken
            | AppError::Decode(_)
            | AppError::InvalidId => StatusCode::BAD_REQUEST,
            AppError::BasicAuth | AppError::BadCredentials => StatusCode::UNAUTHORIZED,
            AppError::Denied => StatusCode::FORBIDDEN,
            AppError::UsernameExists | AppError::EmailExists => StatusCode::NOT_ACCEPTABLE,
            AppError::NoAffect => StatusCode::GONE,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::Validation(errors) => (
                status,
                Json(ValidationResponse {
                    message: VALIDATION_MESSAGE,
                    errors,
                }),
            )
                .into_response(),
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "unhandled error");
                (
                    status,
                    Json(ErrorResponse {
                        message: INTERNAL_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
            declared => (
                status,
                Json(ErrorResponse {
                    message: declared.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Db(err) => AppError::internal(err),
        }
    }
}
