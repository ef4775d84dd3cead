//! Field validators - pure business-rule checks.
//!
//! Stateless, no I/O. Each validator returns the first violated rule as a
//! tagged error; callers must preserve the documented evaluation order
//! since it determines which error surfaces when several fields are bad.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{
    MAX_FULL_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_PHONE_DIGITS, MIN_FULL_NAME_LENGTH,
    MIN_PASSWORD_LENGTH, MIN_PHONE_DIGITS,
};
use crate::errors::{AppError, AppResult};

/// Phone grammar: literal +62 prefix followed by 10 to 13 digits.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\+62\d{{{},{}}}$",
        MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
    ))
    .expect("phone regex is valid")
});

/// Validate a phone number against the `+62` grammar.
pub fn validate_phone(phone_number: &str) -> AppResult<()> {
    if !PHONE_REGEX.is_match(phone_number) {
        return Err(AppError::IneligiblePhone);
    }

    Ok(())
}

/// Validate password strength.
///
/// Rules are checked in this exact order, first failure wins:
/// length, capital letter, numeric, special character.
pub fn validate_password(password: &str) -> AppResult<()> {
    let length = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(AppError::PasswordLength);
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AppError::PasswordCapital);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::PasswordNumeric);
    }

    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return Err(AppError::PasswordSpecialChar);
    }

    Ok(())
}

/// Validate full name length (3 to 60 characters inclusive).
pub fn validate_full_name(full_name: &str) -> AppResult<()> {
    let length = full_name.chars().count();
    if !(MIN_FULL_NAME_LENGTH..=MAX_FULL_NAME_LENGTH).contains(&length) {
        return Err(AppError::FullNameLength);
    }

    Ok(())
}
