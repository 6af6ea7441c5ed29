//! User facing messages shown next to invalid form fields

pub static REQUIRED: &str = "This field is required.";

pub static INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

pub static LICENSE_NUMBER_LENGTH: &str = "License number should consist of 8 characters";

pub static LICENSE_NUMBER_UPPERCASE: &str = "First 3 characters should be uppercase letters";

pub static LICENSE_NUMBER_DIGITS: &str = "Last 5 characters should be digits";

pub static MANUFACTURER_NAME_IN_USE: &str = "Manufacturer with this Name already exists.";

pub static USERNAME_IN_USE: &str = "A user with that username already exists.";

pub static LICENSE_NUMBER_IN_USE: &str = "Driver with this License number already exists.";

pub static PASSWORD_MISMATCH: &str = "The two password fields didn't match.";

pub static PASSWORD_TOO_SHORT: &str =
    "This password is too short. It must contain at least 8 characters.";

pub static PASSWORD_ENTIRELY_NUMERIC: &str = "This password is entirely numeric.";

/// sign in failed because the username does not exist or the password is wrong
pub static INVALID_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// a submitted id of a multiple choice field does not match any record
pub fn invalid_multiple_choice(value: &str) -> String {
    format!(
        "Select a valid choice. {} is not one of the available choices.",
        value
    )
}

pub static INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
