/*
 * Responsibility
 * - Books の write command (NewBook / UpdateBook)
 */
use serde::Deserialize;
use validator::Validate;

use crate::validation::{Command, null_as_default};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct NewBook {
    #[serde(deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub isbn: String,
    #[serde(deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
}

impl Command for NewBook {
    const FIELDS: &'static [&'static str] = &["isbn", "title", "author", "category"];
}

/// Empty `isbn` / `title` / `author` keep the stored value.
/// `category` replaces it whenever present, even as "".
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateBook {
    #[serde(deserialize_with = "null_as_default")]
    pub isbn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    pub category: Option<String>,
}

impl Command for UpdateBook {
    const FIELDS: &'static [&'static str] = &["isbn", "title", "author", "category"];
}
