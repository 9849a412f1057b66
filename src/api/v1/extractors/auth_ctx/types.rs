/*
 * Responsibility
 * - The authenticated caller as handlers and gates see it
 * - Built once by the access pipeline from verified Claims, read-only afterwards
 */
use crate::services::auth::{Claims, has_role};

/// Identity attached to a request after its bearer token was verified.
///
/// - `user_id` is the token subject
/// - `roles` may be empty; that is still "logged in", unlike an absent AuthCtx
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    user_id: String,
    roles: Vec<String>,
}

impl AuthCtx {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn has_role(&self, wanted: &str) -> bool {
        has_role(&self.roles, wanted)
    }
}

impl From<Claims> for AuthCtx {
    fn from(claims: Claims) -> Self {
        let (user_id, roles) = claims.into_parts();
        Self { user_id, roles }
    }
}
