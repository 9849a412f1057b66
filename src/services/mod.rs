/*
 * Responsibility
 * - 業務ロジック (auth / users / books)
 */
use uuid::Uuid;

use crate::error::AppError;

pub mod auth;
pub mod books;
pub mod users;

pub use books::BookService;
pub use users::UserService;

/// Path ids must be UUIDs; anything else is a client error, not a lookup miss.
pub(crate) fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId)
}
