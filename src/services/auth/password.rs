//! Argon2id password hashing.
//!
//! Hashes are stored in PHC string form (salt included) and never leave the service layer.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("generating password hash: {0}")]
    Hashing(argon2::password_hash::Error),
    #[error("password does not match")]
    Mismatch,
    #[error("stored password hash is malformed")]
    InvalidHashFormat,
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        AppError::internal(e)
    }
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hashing)?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::Mismatch)
}
