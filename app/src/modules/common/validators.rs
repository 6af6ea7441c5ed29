use super::error_codes::{
    INVALID_USERNAME, LICENSE_NUMBER_DIGITS, LICENSE_NUMBER_LENGTH, LICENSE_NUMBER_UPPERCASE,
    PASSWORD_ENTIRELY_NUMERIC, PASSWORD_TOO_SHORT, REQUIRED,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use thiserror::Error;
use validator::ValidationError;

lazy_static! {
    //
    pub static ref REGEX_IS_UPPERCASE_LETTERS: Regex = Regex::new(r"^[A-Z]+$").unwrap();
    //
    pub static ref REGEX_IS_DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();
    //
    pub static ref REGEX_IS_USERNAME: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

/// Minimum length of a driver password
pub const PASSWORD_MIN_LEN: usize = 8;

/// Length of a driver license number, format: AAA99999
pub const LICENSE_NUMBER_LEN: usize = 8;

const LICENSE_NUMBER_PREFIX_LEN: usize = 3;

/// The first rule a license number breaks, rules are checked in declaration order
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum LicenseNumberError {
    #[error("License number should consist of 8 characters")]
    Length,

    #[error("First 3 characters should be uppercase letters")]
    Uppercase,

    #[error("Last 5 characters should be digits")]
    Digits,
}

impl LicenseNumberError {
    fn code(self) -> &'static str {
        match self {
            Self::Length => "license_number_length",
            Self::Uppercase => "license_number_uppercase",
            Self::Digits => "license_number_digits",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Length => LICENSE_NUMBER_LENGTH,
            Self::Uppercase => LICENSE_NUMBER_UPPERCASE,
            Self::Digits => LICENSE_NUMBER_DIGITS,
        }
    }
}

/// Checks a license number is exactly 8 characters, 3 uppercase ASCII
/// letters followed by 5 ASCII digits.
pub fn check_license_number(value: &str) -> Result<(), LicenseNumberError> {
    if value.chars().count() != LICENSE_NUMBER_LEN {
        return Err(LicenseNumberError::Length);
    }

    // length is in chars, split on a char boundary
    let split_at = value
        .char_indices()
        .nth(LICENSE_NUMBER_PREFIX_LEN)
        .map_or(value.len(), |(i, _)| i);

    let (prefix, suffix) = value.split_at(split_at);

    if !REGEX_IS_UPPERCASE_LETTERS.is_match(prefix) {
        return Err(LicenseNumberError::Uppercase);
    }

    if !REGEX_IS_DIGITS.is_match(suffix) {
        return Err(LicenseNumberError::Digits);
    }

    Ok(())
}

/// `validator` adapter for `check_license_number`
pub fn validate_license_number(value: &str) -> Result<(), ValidationError> {
    check_license_number(value).map_err(|e| {
        let mut err = ValidationError::new(e.code());
        err.message = Some(Cow::from(e.message()));
        err
    })
}

/// Fails for empty or whitespace only values
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::from(REQUIRED));
        return Err(err);
    }

    Ok(())
}

/// A required license number, empty values fail as required instead of with the length message
pub fn validate_required_license_number(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    validate_license_number(value)
}

/// A required username made of letters, digits and `@.+-_`
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;

    if !REGEX_IS_USERNAME.is_match(value) {
        let mut err = ValidationError::new("username");
        err.message = Some(Cow::from(INVALID_USERNAME));
        return Err(err);
    }

    Ok(())
}

/// Password strength rules, every broken rule is reported
pub fn password_problems(password: &str) -> Vec<&'static str> {
    let mut problems = vec![];

    if password.chars().count() < PASSWORD_MIN_LEN {
        problems.push(PASSWORD_TOO_SHORT);
    }

    if REGEX_IS_DIGITS.is_match(password) {
        problems.push(PASSWORD_ENTIRELY_NUMERIC);
    }

    problems
}
