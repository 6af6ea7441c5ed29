use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use handlebars::html_escape;
use http::{header, StatusCode};
use serde::Serialize;

/// A struct for simple error responses, contains a timestamp from the moment
/// of its creation and a error message
///
/// its meant to be shown to a browser so its `IntoResponse` implementation
/// renders a minimal HTML page with the escaped message
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SimpleError {
    error: String,
    timestamp: DateTime<Utc>,
}

impl SimpleError {
    /// Creates a simple error with a generic 'internal server error message'
    /// ideally this should be used whenever something that should almost never
    /// fail on the request lifecycle does fail.
    pub fn internal() -> SimpleError {
        SimpleError::from("internal server error")
    }

    pub fn entity_not_found() -> SimpleError {
        SimpleError::from("entity not found")
    }

    pub fn message(&self) -> &str {
        &self.error
    }
}

impl From<String> for SimpleError {
    fn from(v: String) -> Self {
        SimpleError {
            error: v,
            timestamp: Utc::now(),
        }
    }
}

impl From<&str> for SimpleError {
    fn from(v: &str) -> Self {
        SimpleError::from(String::from(v))
    }
}

impl From<anyhow::Error> for SimpleError {
    /// since anyhow errors might contain private error messages such as DB errors
    /// or a stack description, always convert to a generic internal error
    fn from(_: anyhow::Error) -> Self {
        SimpleError::internal()
    }
}

impl IntoResponse for SimpleError {
    fn into_response(self) -> Response {
        Html(format!(
            "<!DOCTYPE html><html><head><title>Error</title></head><body><h1>{}</h1><p>{}</p></body></html>",
            html_escape(&self.error),
            self.timestamp.to_rfc3339(),
        ))
        .into_response()
    }
}

pub fn internal_error_res() -> (StatusCode, SimpleError) {
    (StatusCode::INTERNAL_SERVER_ERROR, SimpleError::internal())
}

/// A `302 Found` redirect, the status browsers and form posts expect after
/// a successful mutation
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_sets_location() {
        let res = found("/cars/");

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "/cars/");
    }

    #[test]
    fn anyhow_errors_are_hidden() {
        let err = SimpleError::from(anyhow::anyhow!("password column is missing"));
        assert_eq!(err.message(), "internal server error");
    }
}
