use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Field level error messages of a submitted form, keyed by field name.
///
/// serializes to `{ "<field>": ["<message>", ..] }` so templates can
/// render the messages next to each input
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds a message to a field, keeping the messages already present
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(String::from(field))
            .or_default()
            .push(message.into());
    }

    /// Messages of a single field, in the order they were added
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// First message of a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.field(field).first().map(String::as_str)
    }
}

/// Deserializes a text input without its surrounding whitespace, so the
/// validators see the same value that gets stored
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_owned())
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();

        for (field, kind) in errors.errors() {
            if let ValidationErrorsKind::Field(field_errors) = kind {
                for e in field_errors {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({}).", e.code));

                    form_errors.add(field, message);
                }
            }
        }

        form_errors
    }
}
