use axum::extract::FromRequestParts;
use axum::http::{Extensions, request::Parts};

use crate::error::AppError;

use super::AuthCtx;

/// Attach a verified identity to the request scope.
///
/// The first identity wins; later calls leave it untouched.
pub fn attach(extensions: &mut Extensions, ctx: AuthCtx) {
    if extensions.get::<AuthCtx>().is_none() {
        extensions.insert(ctx);
    }
}

pub fn current(extensions: &Extensions) -> Option<&AuthCtx> {
    extensions.get::<AuthCtx>()
}

/// `None` when no identity was ever attached.
pub fn caller_id(extensions: &Extensions) -> Option<&str> {
    current(extensions).map(AuthCtx::user_id)
}

/// `None` when no identity was ever attached; `Some(&[])` for a caller without roles.
pub fn roles(extensions: &Extensions) -> Option<&[String]> {
    current(extensions).map(AuthCtx::roles)
}

/// Handler で AuthCtx を受け取るための extractor
/// The access layer must have attached the identity; otherwise the request is denied (fail closed).
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current(&parts.extensions)
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Denied)
    }
}
