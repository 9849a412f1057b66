/*
 * Responsibility
 * - Users の write command (NewUser / UpdateUser)
 * - 欠けたフィールドは空文字扱い、未知のフィールドは decode エラー
 */
use serde::Deserialize;
use validator::Validate;

use crate::validation::{Command, null_as_default, validate_optional_email, validate_password};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct NewUser {
    #[serde(deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"))]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "required"), email)]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    #[validate(
        length(min = 1, code = "required"),
        custom(function = "validate_password")
    )]
    pub password: String,
}

impl Command for NewUser {
    const FIELDS: &'static [&'static str] = &["username", "email", "roles", "password"];
}

/// Empty strings / an empty role list leave the stored value unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateUser {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_optional_email"))]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl Command for UpdateUser {
    const FIELDS: &'static [&'static str] = &["username", "email", "roles", "password"];
}
