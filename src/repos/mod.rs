/*
 * Responsibility
 * - 永続化の境界 (trait + Postgres 実装)
 * - memory はテスト専用
 */
pub mod book_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod user_repo;

pub use book_repo::{Book, BookRepo, BookSearch, PgBookRepo, SortField, SortOrder};
pub use user_repo::{PgUserRepo, User, UserRepo};
