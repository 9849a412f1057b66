/*
 * Responsibility
 * - User の業務ルール (一意性チェック / パスワードハッシュ / 認証)
 * - repo は UserRepo trait 越し (Postgres / テスト用 memory を差し替え可能)
 */
use std::sync::Arc;

use uuid::Uuid;

use crate::api::v1::dto::users::{NewUser, UpdateUser};
use crate::error::AppError;
use crate::repos::{User, UserRepo};
use crate::services::auth::Claims;
use crate::services::auth::password::{PasswordError, hash_password, verify_password};
use crate::services::parse_id;

// argon2 is CPU-bound; keep it off the async workers.
async fn hash(password: String) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(AppError::internal)??;
    Ok(hash)
}

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepo>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let id = parse_id(id)?;
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn create(&self, cmd: NewUser) -> Result<User, AppError> {
        let username = cmd.username.trim().to_string();
        let email = cmd.email.trim().to_string();

        if !self.repo.username_available(&username, None).await? {
            return Err(AppError::UsernameExists);
        }
        if !self.repo.email_available(&email, None).await? {
            return Err(AppError::EmailExists);
        }

        let user = User {
            id: Uuid::new_v4(),
            username,
            email,
            roles: cmd.roles,
            password_hash: hash(cmd.password).await?,
        };
        self.repo.create(&user).await?;

        Ok(user)
    }

    pub async fn update(&self, id: &str, cmd: UpdateUser) -> Result<(), AppError> {
        let id = parse_id(id)?;
        let mut user = self.repo.get_by_id(id).await?.ok_or(AppError::NoAffect)?;

        if !cmd.username.is_empty() {
            user.username = cmd.username.trim().to_string();
            if !self.repo.username_available(&user.username, Some(id)).await? {
                return Err(AppError::UsernameExists);
            }
        }
        if !cmd.email.is_empty() {
            user.email = cmd.email.trim().to_string();
            if !self.repo.email_available(&user.email, Some(id)).await? {
                return Err(AppError::EmailExists);
            }
        }
        if !cmd.roles.is_empty() {
            user.roles = cmd.roles;
        }
        if !cmd.password.is_empty() {
            user.password_hash = hash(cmd.password).await?;
        }

        Ok(self.repo.update(&user).await?)
    }

    pub async fn destroy(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if !self.repo.destroy(id).await? {
            return Err(AppError::NoAffect);
        }
        Ok(())
    }

    /// Unknown username and wrong password fail the same way.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Claims, AppError> {
        let user = self
            .repo
            .get_by_username(username)
            .await?
            .ok_or(AppError::BadCredentials)?;

        let password = password.to_string();
        let stored = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(AppError::internal)?;

        match verified {
            Ok(()) => Ok(Claims::new(user.id.to_string(), user.roles)),
            Err(PasswordError::Mismatch) => Err(AppError::BadCredentials),
            Err(e) => Err(e.into()),
        }
    }
}
