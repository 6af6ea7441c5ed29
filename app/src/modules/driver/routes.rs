use super::dto::{
    DriverCarDto, DriverConfirmDeletePage, DriverCreationForm, DriverDetailPage, DriverDto,
    DriverFields, DriverFormPage, DriverListPage, DriverSearch, DriverUpdateForm,
    SEARCH_PLACEHOLDER,
};
use super::repository;
use crate::database::{
    filters::non_blank,
    pagination::{fetch_page, PAGE_SIZE},
};
use crate::modules::auth::middleware::{require_driver, RequestDriver};
use crate::modules::common::{
    dto::{search_query_suffix, NavUser},
    error_codes::{LICENSE_NUMBER_IN_USE, PASSWORD_MISMATCH, USERNAME_IN_USE},
    extractors::{DbConnection, ValidatedForm, ValidatedQuery},
    forms::FormErrors,
    responses::{found, internal_error_res, SimpleError},
    validators::password_problems,
};
use crate::server::{controller::AppState, templates};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use http::StatusCode;
use sea_orm::PaginatorTrait;
use serde::Serialize;
use tracing::{error, info};

const LIST_URL: &str = "/drivers/";

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/drivers/", get(list_drivers))
        .route("/drivers/create/", get(create_driver_page).post(create_driver))
        .route("/drivers/:id/", get(driver_detail))
        .route(
            "/drivers/:id/update/",
            get(update_driver_page).post(update_driver),
        )
        .route(
            "/drivers/:id/delete/",
            get(delete_driver_page).post(delete_driver),
        )
        .route_layer(axum::middleware::from_fn_with_state(state, require_driver))
}

fn render_form<F: Serialize>(
    state: &AppState,
    status: StatusCode,
    page: &DriverFormPage<F>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let html = state.templates.render(templates::DRIVER_FORM, page)?;
    Ok((status, html).into_response())
}

/// adds the errors only the database can tell about to a form that passed validation
async fn check_unique_fields(
    state: &AppState,
    fields: &DriverFields<'_>,
    exclude_id: Option<i32>,
    errors: &mut FormErrors,
) -> Result<(), (StatusCode, SimpleError)> {
    if errors.field("username").is_empty()
        && repository::username_in_use(&state.db, fields.username, exclude_id).await?
    {
        errors.add("username", USERNAME_IN_USE);
    }

    if errors.field("license_number").is_empty()
        && repository::license_number_in_use(&state.db, fields.license_number, exclude_id).await?
    {
        errors.add("license_number", LICENSE_NUMBER_IN_USE);
    }

    Ok(())
}

/// the form field and message of a unique constraint the database rejected
fn unique_violation_error(violation: &str) -> (&'static str, &'static str) {
    if violation.contains("license_number") {
        ("license_number", LICENSE_NUMBER_IN_USE)
    } else {
        ("username", USERNAME_IN_USE)
    }
}

/// the confirmation must match the password and the password must not be weak,
/// problems are reported on the confirmation field
fn check_passwords(form: &DriverCreationForm, errors: &mut FormErrors) {
    if !errors.field("password1").is_empty() || !errors.field("password2").is_empty() {
        return;
    }

    if form.password1 != form.password2 {
        errors.add("password2", PASSWORD_MISMATCH);
        return;
    }

    for problem in password_problems(&form.password2) {
        errors.add("password2", problem);
    }
}

/// Lists drivers by id, 5 per page
pub async fn list_drivers(
    State(state): State<AppState>,
    DbConnection(db): DbConnection,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedQuery(query): ValidatedQuery<DriverSearch>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let search = non_blank(query.username.as_deref());

    let paginator = repository::search(search).paginate(&db, PAGE_SIZE);
    let page = fetch_page(paginator, query.page.as_deref())
        .await?
        .map(DriverDto::from);

    let list_page = DriverListPage {
        user: NavUser::from(&req_driver),
        driver_list: page.records,
        is_paginated: page.meta.is_paginated,
        page_obj: page.meta,
        search: search.map(String::from),
        search_placeholder: SEARCH_PLACEHOLDER,
        query_suffix: search_query_suffix("username", search),
    };

    state.templates.render(templates::DRIVER_LIST, &list_page)
}

/// Shows a driver with the cars it is assigned to
pub async fn driver_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let driver = repository::find_by_id(&state.db, id).await?;
    let cars = repository::cars_of(&state.db, &driver).await?;

    let page = DriverDetailPage {
        user: NavUser::from(&req_driver),
        driver: DriverDto::from(driver),
        cars: cars.into_iter().map(DriverCarDto::from).collect(),
    };

    state.templates.render(templates::DRIVER_DETAIL, &page)
}

pub async fn create_driver_page(
    State(state): State<AppState>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let page = DriverFormPage {
        user: NavUser::from(&req_driver),
        form: &DriverCreationForm::default(),
        errors: &FormErrors::default(),
        is_creation: true,
        object: None,
    };

    render_form(&state, StatusCode::OK, &page)
}

/// Creates a driver with a hashed password, redirecting to the list on success
pub async fn create_driver(
    State(state): State<AppState>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedForm { data, mut errors }: ValidatedForm<DriverCreationForm>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let fields = DriverFields::from(&data);

    check_unique_fields(&state, &fields, None, &mut errors).await?;
    check_passwords(&data, &mut errors);

    if errors.is_empty() {
        let password_hash = state
            .auth_service
            .hash_password(&data.password1)
            .map_err(|e| {
                error!("[WEB] failed to hash driver password: {}", e);
                internal_error_res()
            })?;

        match repository::create_driver(&state.db, &fields, password_hash).await {
            Ok(created) => {
                info!("[WEB] driver {} created", created.id);
                return Ok(found(LIST_URL));
            }
            // taken by a concurrent request after the check
            Err(e) => match e.unique_violation() {
                Some(violation) => {
                    let (field, message) = unique_violation_error(&violation);
                    errors.add(field, message);
                }
                None => return Err(e.into()),
            },
        }
    }

    let page = DriverFormPage {
        user: NavUser::from(&req_driver),
        form: &data,
        errors: &errors,
        is_creation: true,
        object: None,
    };

    render_form(&state, StatusCode::UNPROCESSABLE_ENTITY, &page)
}

pub async fn update_driver_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let driver = repository::find_by_id(&state.db, id).await?;

    let page = DriverFormPage {
        user: NavUser::from(&req_driver),
        form: &DriverUpdateForm::from(&driver),
        errors: &FormErrors::default(),
        is_creation: false,
        object: Some(DriverDto::from(driver)),
    };

    render_form(&state, StatusCode::OK, &page)
}

/// Updates a driver, redirecting to the list on success
pub async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedForm { data, mut errors }: ValidatedForm<DriverUpdateForm>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let driver = repository::find_by_id(&state.db, id).await?;
    let fields = DriverFields::from(&data);

    check_unique_fields(&state, &fields, Some(id), &mut errors).await?;

    if errors.is_empty() {
        match repository::update_driver(&state.db, id, &fields).await {
            Ok(_) => {
                info!("[WEB] driver {} updated", id);
                return Ok(found(LIST_URL));
            }
            Err(e) => match e.unique_violation() {
                Some(violation) => {
                    let (field, message) = unique_violation_error(&violation);
                    errors.add(field, message);
                }
                None => return Err(e.into()),
            },
        }
    }

    let page = DriverFormPage {
        user: NavUser::from(&req_driver),
        form: &data,
        errors: &errors,
        is_creation: false,
        object: Some(DriverDto::from(driver)),
    };

    render_form(&state, StatusCode::UNPROCESSABLE_ENTITY, &page)
}

pub async fn delete_driver_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let driver = repository::find_by_id(&state.db, id).await?;

    let page = DriverConfirmDeletePage {
        user: NavUser::from(&req_driver),
        object: DriverDto::from(driver),
    };

    state
        .templates
        .render(templates::DRIVER_CONFIRM_DELETE, &page)
}

/// Deletes a driver, the cars it was assigned to are kept
pub async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, (StatusCode, SimpleError)> {
    repository::delete_driver(&state.db, id).await?;

    info!("[WEB] driver {} deleted", id);

    Ok(found(LIST_URL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::common::error_codes::{PASSWORD_ENTIRELY_NUMERIC, PASSWORD_TOO_SHORT};

    fn form(password1: &str, password2: &str) -> DriverCreationForm {
        DriverCreationForm {
            password1: String::from(password1),
            password2: String::from(password2),
            ..Default::default()
        }
    }

    #[test]
    fn unique_violations_are_reported_on_their_field() {
        assert_eq!(
            unique_violation_error("UNIQUE constraint failed: driver.license_number"),
            ("license_number", LICENSE_NUMBER_IN_USE)
        );
        assert_eq!(
            unique_violation_error(
                "duplicate key value violates unique constraint \"driver_username_key\""
            ),
            ("username", USERNAME_IN_USE)
        );
    }

    #[test]
    fn mismatched_passwords_are_reported_once() {
        let mut errors = FormErrors::default();
        check_passwords(&form("s3cret-pass", "s3cret-pas"), &mut errors);
        assert_eq!(errors.field("password2"), [PASSWORD_MISMATCH]);
    }

    #[test]
    fn weak_passwords_are_reported_on_confirmation() {
        let mut errors = FormErrors::default();
        check_passwords(&form("1234", "1234"), &mut errors);
        assert_eq!(
            errors.field("password2"),
            [PASSWORD_TOO_SHORT, PASSWORD_ENTIRELY_NUMERIC]
        );
        assert!(errors.field("password1").is_empty());
    }

    #[test]
    fn required_errors_skip_the_checks() {
        let mut errors = FormErrors::default();
        errors.add("password1", "required");
        check_passwords(&form("", "x"), &mut errors);
        assert!(errors.field("password2").is_empty());
    }
}
