use super::session::{get_session_id_from_request_headers, SessionId};
use crate::{modules::common::responses::found, server::controller::AppState};
use axum::{extract::State, response::Response};
use entity::{driver, session};
use tracing::error;
use url::form_urlencoded::byte_serialize;

pub const LOGIN_URL: &str = "/accounts/login/";

/// The signed in driver, available as a extension on private routes
#[derive(Clone)]
pub struct RequestDriver(pub driver::Model);

/// The session of the signed in driver, available as a extension on private routes
#[derive(Clone)]
pub struct RequestSession(pub session::Model);

/// Login page url that sends the driver back to `path` after signing in
pub fn login_redirect_url(path: &str) -> String {
    let next: String = byte_serialize(path.as_bytes()).collect();
    format!("{}?next={}", LOGIN_URL, next)
}

/// middleware for routes that require a signed in driver, queries the DB to get the driver by the
/// session ID cookie, anonymous requests are redirected to the login page. adds the following extensions:
///
/// - `SessionId`
/// - `RequestSession`
/// - `RequestDriver`
pub async fn require_driver(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let original_path = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_owned(), |pq| pq.as_str().to_owned());

    if let Some(session_id) = get_session_id_from_request_headers(req.headers()) {
        let session_token = SessionId::from(session_id);

        match state
            .auth_service
            .get_driver_from_session_id(session_token)
            .await
        {
            Ok(Some((ses, driver))) => {
                req.extensions_mut().insert(session_token);
                req.extensions_mut().insert(RequestSession(ses));
                req.extensions_mut().insert(RequestDriver(driver));

                return next.run(req).await;
            }
            Ok(None) => {}
            Err(e) => error!("[WEB] failed to fetch driver session: {}", e),
        }
    }

    found(&login_redirect_url(&original_path))
}
