//! Access pipeline: bearer token → AuthCtx → per-route role gate.
//!
//! Each check is a [`Gate`]; a [`Pipeline`] runs its gates in order and stops at the first
//! rejection. Two pipelines are wired into the router:
//! - `apply` layers an [`Authenticate`] pipeline over the whole `/api/v1` router
//! - `require_role` puts a [`RequireRole`] pipeline on individual method routes
//!
//! Router layers run before route layers, so authentication always precedes authorization and
//! both precede the handler.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::v1::extractors::{self, AuthCtx};
use crate::error::AppError;
use crate::services::auth::TokenCodec;
use crate::state::AppState;

/// The one route reachable without a bearer token.
pub const TOKEN_ROUTE: &str = "/api/v1/users/token";

pub enum Outcome {
    /// Proceed, carrying the identity known so far.
    Continue(Option<AuthCtx>),
    Reject(AppError),
}

pub trait Gate: Send + Sync {
    fn apply(&self, req: &Request<Body>, identity: Option<&AuthCtx>) -> Outcome;
}

#[derive(Clone, Default)]
pub struct Pipeline {
    gates: Vec<Arc<dyn Gate>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(mut self, gate: impl Gate + 'static) -> Self {
        self.gates.push(Arc::new(gate));
        self
    }

    /// Run every gate in order, starting from whatever identity the request already carries.
    pub fn run(&self, req: &Request<Body>) -> Result<Option<AuthCtx>, AppError> {
        let mut identity = extractors::auth_ctx::current(req.extensions()).cloned();

        for gate in &self.gates {
            match gate.apply(req, identity.as_ref()) {
                Outcome::Continue(next) => identity = next,
                Outcome::Reject(err) => return Err(err),
            }
        }

        Ok(identity)
    }
}

/// Verifies `Authorization: Bearer <token>` on every route except [`TOKEN_ROUTE`].
pub struct Authenticate {
    codec: Arc<TokenCodec>,
}

impl Authenticate {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl Gate for Authenticate {
    fn apply(&self, req: &Request<Body>, identity: Option<&AuthCtx>) -> Outcome {
        // Nested routers see a stripped path; OriginalUri keeps the full one.
        let path = req
            .extensions()
            .get::<OriginalUri>()
            .map(|uri| uri.path())
            .unwrap_or_else(|| req.uri().path());
        if path == TOKEN_ROUTE {
            return Outcome::Continue(identity.cloned());
        }

        let auth = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        let token = match bearer_token(auth) {
            Some(token) => token,
            None => return Outcome::Reject(AppError::AuthHeader),
        };

        match self.codec.verify(token) {
            Ok(claims) => Outcome::Continue(Some(claims.into())),
            Err(err) => Outcome::Reject(err.into()),
        }
    }
}

/// Exactly two space-separated parts, the first being "bearer" in any case.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    let (scheme, token) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

/// Lets the request through only if the caller holds `role` (exact match, no hierarchy).
pub struct RequireRole {
    role: &'static str,
}

impl RequireRole {
    pub fn new(role: &'static str) -> Self {
        Self { role }
    }
}

impl Gate for RequireRole {
    fn apply(&self, _req: &Request<Body>, identity: Option<&AuthCtx>) -> Outcome {
        match identity {
            Some(ctx) if ctx.has_role(self.role) => Outcome::Continue(Some(ctx.clone())),
            Some(ctx) => {
                tracing::warn!(
                    user_id = %ctx.user_id(),
                    required_role = self.role,
                    user_roles = ?ctx.roles(),
                    "permission denied"
                );
                Outcome::Reject(AppError::Denied)
            }
            None => {
                tracing::warn!(required_role = self.role, "no identity attached, denying access");
                Outcome::Reject(AppError::Denied)
            }
        }
    }
}

/// Layer the authentication pipeline over `router`.
pub fn apply(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let pipeline = Arc::new(Pipeline::new().gate(Authenticate::new(state.tokens.clone())));
    router.layer(middleware::from_fn_with_state(pipeline, run_pipeline))
}

/// Gate the method routes registered so far on `route` behind `role`.
pub fn require_role(route: MethodRouter<AppState>, role: &'static str) -> MethodRouter<AppState> {
    let pipeline = Arc::new(Pipeline::new().gate(RequireRole::new(role)));
    route.route_layer(middleware::from_fn_with_state(pipeline, run_pipeline))
}

async fn run_pipeline(
    State(pipeline): State<Arc<Pipeline>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(ctx) = pipeline.run(&req)? {
        // middleware → gate / extractor への受け渡し
        extractors::auth_ctx::attach(req.extensions_mut(), ctx);
    }

    Ok(next.run(req).await)
}
