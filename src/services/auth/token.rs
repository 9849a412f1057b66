use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::config::SigningSecret;
use crate::error::AppError;
use crate::services::auth::claims::Claims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("generating token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    // Expired, tampered and malformed tokens all collapse into this one variant.
    #[error("invalid token")]
    InvalidToken,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::InvalidToken => AppError::InvalidToken,
            TokenError::Encode(err) => AppError::internal(err),
        }
    }
}

/// HS256 bearer-token codec.
///
/// - The secret is injected once at construction and shared read-only across requests.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` must be present, but expiry is compared in `verify_at` without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let token = jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign JWT");
            TokenError::Encode(e)
        })?;

        tracing::debug!(user_id = %claims.user_id(), roles = ?claims.roles(), "token issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                TokenError::InvalidToken
            })?;

        if data.claims.is_expired_at(now) {
            tracing::debug!(user_id = %data.claims.user_id(), "token rejected: expired");
            return Err(TokenError::InvalidToken);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::claims::{ROLE_ADMIN, ROLE_AUTHOR};
    use chrono::Duration;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(&SigningSecret::new(secret).unwrap())
    }

    fn admin_claims() -> Claims {
        Claims::new(
            "a72bec75-0a5f-49af-a844-5763d188788e",
            vec![ROLE_ADMIN.to_string(), ROLE_AUTHOR.to_string()],
        )
    }

    #[test]
    fn sign_then_verify_keeps_subject_and_roles() {
        let codec = codec(TEST_SECRET);
        let claims = admin_claims();

        let token = codec.sign(&claims).unwrap();
        assert!(!token.is_empty());

        let verified = codec.verify(&token).unwrap();
        assert_eq!(verified.user_id(), claims.user_id());
        assert_eq!(verified.roles(), claims.roles());
        assert_eq!(verified, claims);
    }

    #[test]
    fn empty_role_list_survives_round_trip() {
        let codec = codec(TEST_SECRET);
        let claims = Claims::new("bad069ce-4afa-4a53-a673-14ae7b627d06", vec![]);

        let verified = codec.verify(&codec.sign(&claims).unwrap()).unwrap();
        assert!(verified.roles().is_empty());
    }

    #[test]
    fn expired_token_is_just_invalid() {
        let codec = codec(TEST_SECRET);
        let token = codec.sign(&admin_claims()).unwrap();

        let later = Utc::now() + Duration::hours(2);
        assert!(matches!(
            codec.verify_at(&token, later),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn token_issued_in_the_past_is_rejected() {
        let codec = codec(TEST_SECRET);
        let stale = Claims::issued_at("u1", vec![], Utc::now() - Duration::hours(2));
        let token = codec.sign(&stale).unwrap();

        assert!(matches!(codec.verify(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = codec(TEST_SECRET).sign(&admin_claims()).unwrap();

        let result = codec("wrong-secret-key-for-testing-minimum-32-chars").verify(&token);
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec(TEST_SECRET);
        let token = codec.sign(&admin_claims()).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = codec.sign(&Claims::new("someone-else", vec![])).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap();
        parts[1] = forged_payload;

        assert!(matches!(
            codec.verify(&parts.join(".")),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let codec = codec(TEST_SECRET);
        for token in ["", "invalid.token.here", "not-a-jwt"] {
            assert!(matches!(codec.verify(token), Err(TokenError::InvalidToken)));
        }
    }

    #[test]
    fn debug_does_not_print_keys() {
        let printed = format!("{:?}", codec(TEST_SECRET));
        assert!(!printed.contains(TEST_SECRET));
    }
}
