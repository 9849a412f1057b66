/*
 * Responsibility
 * - users テーブル向け SQLx 操作 (PgUserRepo)
 * - service からは UserRepo trait 越しに使う
 * - 見つからない行は None / false で返す (エラーにしない)
 */
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    // PHC string; never rendered
    #[sqlx(rename = "password")]
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;
    async fn get_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    async fn create(&self, user: &User) -> RepoResult<()>;
    async fn update(&self, user: &User) -> RepoResult<()>;
    /// `false` when no row was deleted.
    async fn destroy(&self, id: Uuid) -> RepoResult<bool>;
    /// Free, or already held by `current_id`.
    async fn username_available(&self, username: &str, current_id: Option<Uuid>)
    -> RepoResult<bool>;
    async fn email_available(&self, email: &str, current_id: Option<Uuid>) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn holder_of(&self, column_query: &str, value: &str) -> RepoResult<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(column_query)
            .bind(value)
            .fetch_optional(&self.db)
            .await?;

        Ok(id)
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, roles, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn get_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, roles, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, roles, password)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.roles)
        .bind(&user.password_hash)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, roles = $4, password = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.roles)
        .bind(&user.password_hash)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn destroy(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn username_available(
        &self,
        username: &str,
        current_id: Option<Uuid>,
    ) -> RepoResult<bool> {
        let holder = self
            .holder_of("SELECT id FROM users WHERE username = $1", username)
            .await?;

        Ok(holder.is_none() || holder == current_id)
    }

    async fn email_available(&self, email: &str, current_id: Option<Uuid>) -> RepoResult<bool> {
        let holder = self
            .holder_of("SELECT id FROM users WHERE email = $1", email)
            .await?;

        Ok(holder.is_none() || holder == current_id)
    }
}
