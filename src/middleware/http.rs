//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Per-caller request log for authenticated traffic
//! - Body size limits
//! - Global timeouts

use std::time::{Duration, Instant};

use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::extract::OriginalUri;
use axum::http::{Request, StatusCode, header::HeaderName};
use axum::middleware::{self, Next};
use axum::response::Response;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::v1::extractors::auth_ctx;
use crate::state::AppState;

pub const REQUEST_BODY_LIMIT: usize = 1024 * 1024;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply HTTP-level middleware to the given Router.
///
/// Defaults:
/// - Request-Id header: `x-request-id`
/// - Body limit: 1 MiB
/// - Timeout: 30 seconds
pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                tracing::error!(error = %err, "middleware error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(REQUEST_BODY_LIMIT))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

/// Log one line per request made by an authenticated caller.
///
/// Must sit inside the access layer so the identity is already attached.
pub fn request_log(router: Router<AppState>) -> Router<AppState> {
    router.layer(middleware::from_fn(log_request))
}

async fn log_request(req: Request<Body>, next: Next) -> Response {
    let Some(user_id) = auth_ctx::caller_id(req.extensions()).map(str::to_owned) else {
        return next.run(req).await;
    };
    let roles = auth_ctx::roles(req.extensions())
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let start = Instant::now();

    let res = next.run(req).await;

    tracing::info!(
        user_id = %user_id,
        roles = ?roles,
        status = res.status().as_u16(),
        method = %method,
        path = %path,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );

    res
}
