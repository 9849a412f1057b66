/**
 * Responsibility
 * - what a repo tells the layers above when storage fails
 * - absence is not an error here (Option / bool carry it)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
