/*
 * Responsibility
 * - Decode a raw body into a command shape (unknown fields rejected)
 * - Run the shape's declared constraints (validator derive)
 * - Turn constraint failures into one templated message per field
 */
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::error::AppError;

pub const CODE_REQUIRED: &str = "required";
pub const CODE_EMAIL: &str = "email";
pub const CODE_PASSWORD: &str = "password";

/// A write payload: strictly decoded, then validated.
///
/// `FIELDS` lists the JSON field names in declaration order; validation messages follow it.
pub trait Command: DeserializeOwned + Validate {
    const FIELDS: &'static [&'static str];
}

/// Reads the first JSON value in `body`; anything after it is ignored.
pub fn decode<T: Command>(body: &[u8]) -> Result<T, AppError> {
    let value: T = serde_json::Deserializer::from_slice(body)
        .into_iter::<T>()
        .next()
        .ok_or_else(|| AppError::decode("EOF"))?
        .map_err(AppError::decode)?;

    value
        .validate()
        .map_err(|errs| AppError::Validation(messages(T::FIELDS, &errs)))?;

    Ok(value)
}

/// Field-level `deserialize_with`: an explicit `null` is the zero value, same as absent.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn messages(fields: &[&str], errs: &ValidationErrors) -> Vec<String> {
    let by_field = errs.field_errors();

    fields
        .iter()
        .filter_map(|field| {
            let first = by_field
                .get(*field)?
                .iter()
                .min_by_key(|e| rule_rank(&e.code))?;
            Some(translate(field, first))
        })
        .collect()
}

// `required` wins over the format rules, matching "required,email" tag order.
fn rule_rank(code: &str) -> u8 {
    match code {
        CODE_REQUIRED => 0,
        _ => 1,
    }
}

fn translate(field: &str, err: &ValidationError) -> String {
    match err.code.as_ref() {
        CODE_REQUIRED => format!("{field} is a required field"),
        CODE_EMAIL => format!("{field} must be a valid email address"),
        CODE_PASSWORD => format!(
            "{field} must greater than 5 characters and contain a capital letter, lower case letter, number, and special character"
        ),
        other => format!("{field} failed on the '{other}' rule"),
    }
}

/// Length of at least 6 bytes plus an uppercase, a lowercase, a digit and a punctuation/symbol.
pub fn is_strong_password(s: &str) -> bool {
    let (mut upper, mut lower, mut number, mut special) = (false, false, false, false);

    for c in s.chars() {
        if c.is_uppercase() {
            upper = true;
        } else if c.is_lowercase() {
            lower = true;
        } else if c.is_numeric() {
            number = true;
        } else if c.is_ascii_punctuation()
            || (!c.is_ascii() && !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control())
        {
            special = true;
        }
    }

    s.len() >= 6 && upper && lower && number && special
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_strong_password(value) {
        // Emptiness is the `required` rule's business.
        return Ok(());
    }
    Err(ValidationError::new(CODE_PASSWORD))
}

/// Email rule that lets an empty value through (an omitted field on updates).
pub fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new(CODE_EMAIL))
}
