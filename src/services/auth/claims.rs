use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_AUTHOR: &str = "AUTHOR";

/// How long an issued token stays valid, in seconds.
pub const TOKEN_VALIDITY_SECS: i64 = 60 * 60;

/// Verified identity plus roles at a point in time; the payload inside a bearer token.
///
/// - `userid` is the opaque caller id (a UUID string for stored users)
/// - `roles` are compared case-sensitively; duplicates are harmless
/// - `iat` / `exp` are unix seconds, `exp = iat + TOKEN_VALIDITY_SECS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userid")]
    user_id: String,
    #[serde(default)]
    roles: Vec<String>,
    iat: i64,
    exp: i64,
}

impl Claims {
    /// Claims for a caller who just authenticated.
    pub fn new(user_id: impl Into<String>, roles: Vec<String>) -> Self {
        Self::issued_at(user_id, roles, Utc::now())
    }

    pub fn issued_at(user_id: impl Into<String>, roles: Vec<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            roles,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_VALIDITY_SECS)).timestamp(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.user_id, self.roles)
    }
}

/// Exact, case-sensitive membership. No role implies another.
pub fn has_role(roles: &[String], wanted: &str) -> bool {
    roles.iter().any(|has| has == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn new_claims_expire_one_hour_after_issue() {
        let now = Utc::now();
        let claims = Claims::issued_at(
            "a72bec75-0a5f-49af-a844-5763d188788e",
            roles(&[ROLE_ADMIN]),
            now,
        );

        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::hours(1)));
    }

    #[test]
    fn roles_are_kept_as_given() {
        let claims = Claims::new("c86057bd", roles(&[ROLE_AUTHOR, ROLE_AUTHOR]));
        assert_eq!(claims.roles(), &[ROLE_AUTHOR, ROLE_AUTHOR]);
    }

    #[test]
    fn serializes_with_wire_names() {
        let claims = Claims::issued_at("u1", roles(&[ROLE_ADMIN]), DateTime::UNIX_EPOCH);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "userid": "u1", "roles": ["ADMIN"], "iat": 0, "exp": 3600 })
        );
    }

    #[test]
    fn has_role_is_exact_match() {
        assert!(has_role(&roles(&[ROLE_ADMIN, ROLE_AUTHOR]), ROLE_ADMIN));
        assert!(has_role(&roles(&[ROLE_AUTHOR]), ROLE_AUTHOR));
        assert!(!has_role(&roles(&[]), ROLE_ADMIN));
        assert!(!has_role(&roles(&[ROLE_AUTHOR]), ROLE_ADMIN));
        assert!(!has_role(&roles(&["admin"]), ROLE_ADMIN));
    }
}
