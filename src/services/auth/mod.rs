pub mod claims;
pub mod password;
pub mod token;

pub use claims::{Claims, ROLE_ADMIN, ROLE_AUTHOR, has_role};
pub use token::TokenCodec;
