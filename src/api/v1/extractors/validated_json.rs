//! Body extractor for write routes: strict JSON decode, then declared constraints.
//!
//! Rejections are `AppError::Decode` (400) or `AppError::Validation` (422), so handlers only
//! ever see a payload that passed both.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};

use crate::error::AppError;
use crate::validation::{self, Command};

pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Command,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Content-Type is not checked; the body alone decides.
        let body = Bytes::from_request(req, state)
            .await
            .map_err(AppError::decode)?;

        validation::decode(&body).map(ValidatedJson)
    }
}
