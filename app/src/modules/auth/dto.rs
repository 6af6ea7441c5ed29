use crate::modules::common::{forms::FormErrors, validators::validate_required};
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- INPUT

#[derive(Deserialize, Validate, Serialize, Debug, Default)]
pub struct LoginForm {
    #[validate(custom = "validate_required")]
    #[serde(default)]
    pub username: String,

    #[validate(custom = "validate_required")]
    #[serde(default)]
    #[serde(skip_serializing)]
    pub password: String,

    /// where to send the driver after signing in, posted as a hidden input
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LoginQuery {
    pub next: Option<String>,
}

// --- OUTPUT

#[derive(Serialize, Debug)]
pub struct LoginPage<'a> {
    pub form: &'a LoginForm,
    pub errors: &'a FormErrors,

    /// errors not bound to a single field, eg: wrong credentials
    pub non_field_errors: Vec<&'static str>,

    pub next: &'a str,
}

/// Only local paths are accepted as a redirect target after signing in,
/// anything else falls back to the home page
pub fn safe_next(next: Option<&str>) -> &str {
    match next.map(str::trim) {
        Some(n) if n.starts_with('/') && !n.starts_with("//") && !n.contains('\\') => n,
        _ => "/",
    }
}
