use super::dto::{safe_next, LoginForm, LoginPage, LoginQuery};
use super::middleware::{require_driver, RequestDriver, LOGIN_URL};
use super::service::DriverFromCredentialsError;
use super::session::{OptionalSessionId, SessionId};
use crate::modules::common::{
    error_codes::INVALID_CREDENTIALS,
    extractors::ValidatedForm,
    forms::FormErrors,
    responses::{found, internal_error_res, SimpleError},
};
use crate::server::{controller::AppState, templates};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Router,
};
use http::{header, HeaderMap, StatusCode};
use tracing::{error, info};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/accounts/logout/", post(sign_out))
        .route_layer(axum::middleware::from_fn_with_state(state, require_driver))
        .route("/accounts/login/", get(login_page).post(sign_in))
}

fn render_login(
    state: &AppState,
    status: StatusCode,
    form: &LoginForm,
    errors: &FormErrors,
    non_field_errors: Vec<&'static str>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let next = form.next.as_deref().unwrap_or_default();

    let page = LoginPage {
        form,
        errors,
        non_field_errors,
        next,
    };

    Ok((status, state.templates.render(templates::LOGIN, &page)?).into_response())
}

/// Renders the login page
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let form = LoginForm {
        next: query.next,
        ..Default::default()
    };

    render_login(&state, StatusCode::OK, &form, &FormErrors::default(), vec![])
}

/// Signs in a driver by username and password
///
/// creates a new session and sets the `sid` cookie, any session the
/// request already had is deleted
pub async fn sign_in(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    old_session: OptionalSessionId,
    headers: HeaderMap,
    ValidatedForm { mut data, errors }: ValidatedForm<LoginForm>,
) -> Result<Response, (StatusCode, SimpleError)> {
    if data.next.is_none() {
        data.next = query.next;
    }

    if !errors.is_empty() {
        return render_login(&state, StatusCode::UNPROCESSABLE_ENTITY, &data, &errors, vec![]);
    }

    let driver = match state
        .auth_service
        .get_driver_from_credentials(&data.username, &data.password)
        .await
    {
        Ok(driver) => driver,
        Err(DriverFromCredentialsError::InternalError) => return Err(internal_error_res()),
        Err(DriverFromCredentialsError::NotFound | DriverFromCredentialsError::InvalidPassword) => {
            return render_login(
                &state,
                StatusCode::UNPROCESSABLE_ENTITY,
                &data,
                &errors,
                vec![INVALID_CREDENTIALS],
            );
        }
    };

    if let Some(old_session_id) = old_session.get_value() {
        if let Err(e) = state.auth_service.delete_session(&old_session_id).await {
            error!("[WEB] failed to delete previous session: {}", e);
        }
    }

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let ses_token = state
        .auth_service
        .new_session(driver.id, user_agent)
        .await
        .map_err(|e| {
            error!("[WEB] failed to create session: {}", e);
            internal_error_res()
        })?;

    state
        .auth_service
        .touch_last_login(driver.id)
        .await
        .map_err(|e| {
            error!("[WEB] failed to update last login: {}", e);
            internal_error_res()
        })?;

    info!("[WEB] driver {} signed in", driver.username);

    let mut res = found(safe_next(data.next.as_deref()));
    res.headers_mut()
        .insert(header::SET_COOKIE, ses_token.into_set_cookie_header());

    Ok(res)
}

/// Signs out the request driver by deleting its session
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Extension(RequestDriver(driver)): Extension<RequestDriver>,
) -> Result<Response, (StatusCode, SimpleError)> {
    state
        .auth_service
        .delete_session(&session_id)
        .await
        .map_err(|e| {
            error!("[WEB] failed to delete session: {}", e);
            internal_error_res()
        })?;

    info!("[WEB] driver {} signed out", driver.username);

    let mut res = found(LOGIN_URL);
    res.headers_mut()
        .insert(header::SET_COOKIE, session_id.into_delete_cookie_header());

    Ok(res)
}
