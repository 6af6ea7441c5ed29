use super::dto::{
    ManufacturerConfirmDeletePage, ManufacturerDto, ManufacturerForm, ManufacturerFormPage,
    ManufacturerListPage, ManufacturerSearch, SEARCH_PLACEHOLDER,
};
use super::repository;
use crate::database::{
    filters::non_blank,
    pagination::{fetch_page, PAGE_SIZE},
};
use crate::modules::auth::middleware::{require_driver, RequestDriver};
use crate::modules::common::{
    dto::{search_query_suffix, NavUser},
    error_codes::MANUFACTURER_NAME_IN_USE,
    extractors::{DbConnection, ValidatedForm, ValidatedQuery},
    forms::FormErrors,
    responses::{found, SimpleError},
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
use tracing::info;

const LIST_URL: &str = "/manufacturers/";

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/manufacturers/", get(list_manufacturers))
        .route(
            "/manufacturers/create/",
            get(create_manufacturer_page).post(create_manufacturer),
        )
        .route(
            "/manufacturers/:id/update/",
            get(update_manufacturer_page).post(update_manufacturer),
        )
        .route(
            "/manufacturers/:id/delete/",
            get(delete_manufacturer_page).post(delete_manufacturer),
        )
        .route_layer(axum::middleware::from_fn_with_state(state, require_driver))
}

fn render_form(
    state: &AppState,
    status: StatusCode,
    page: &ManufacturerFormPage,
) -> Result<Response, (StatusCode, SimpleError)> {
    let html = state.templates.render(templates::MANUFACTURER_FORM, page)?;
    Ok((status, html).into_response())
}

/// adds the errors only the database can tell about to a form that passed validation
async fn check_unique_name(
    state: &AppState,
    form: &ManufacturerForm,
    exclude_id: Option<i32>,
    errors: &mut FormErrors,
) -> Result<(), (StatusCode, SimpleError)> {
    if errors.field("name").is_empty()
        && repository::name_in_use(&state.db, &form.name, exclude_id).await?
    {
        errors.add("name", MANUFACTURER_NAME_IN_USE);
    }

    Ok(())
}

/// Lists manufacturers by name, 5 per page
pub async fn list_manufacturers(
    State(state): State<AppState>,
    DbConnection(db): DbConnection,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedQuery(query): ValidatedQuery<ManufacturerSearch>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let search = non_blank(query.name.as_deref());

    let paginator = repository::search(search).paginate(&db, PAGE_SIZE);
    let page = fetch_page(paginator, query.page.as_deref())
        .await?
        .map(ManufacturerDto::from);

    let list_page = ManufacturerListPage {
        user: NavUser::from(&req_driver),
        manufacturer_list: page.records,
        is_paginated: page.meta.is_paginated,
        page_obj: page.meta,
        search: search.map(String::from),
        search_placeholder: SEARCH_PLACEHOLDER,
        query_suffix: search_query_suffix("name", search),
    };

    state
        .templates
        .render(templates::MANUFACTURER_LIST, &list_page)
}

pub async fn create_manufacturer_page(
    State(state): State<AppState>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let page = ManufacturerFormPage {
        user: NavUser::from(&req_driver),
        form: &ManufacturerForm::default(),
        errors: &FormErrors::default(),
        object: None,
    };

    render_form(&state, StatusCode::OK, &page)
}

/// Creates a manufacturer, redirecting to the list on success
pub async fn create_manufacturer(
    State(state): State<AppState>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedForm { data, mut errors }: ValidatedForm<ManufacturerForm>,
) -> Result<Response, (StatusCode, SimpleError)> {
    check_unique_name(&state, &data, None, &mut errors).await?;

    if errors.is_empty() {
        match repository::create_manufacturer(&state.db, &data).await {
            Ok(created) => {
                info!("[WEB] manufacturer {} created", created.id);
                return Ok(found(LIST_URL));
            }
            // taken by a concurrent request after the check
            Err(e) if e.unique_violation().is_some() => {
                errors.add("name", MANUFACTURER_NAME_IN_USE)
            }
            Err(e) => return Err(e.into()),
        }
    }

    let page = ManufacturerFormPage {
        user: NavUser::from(&req_driver),
        form: &data,
        errors: &errors,
        object: None,
    };

    render_form(&state, StatusCode::UNPROCESSABLE_ENTITY, &page)
}

pub async fn update_manufacturer_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let manufacturer = repository::find_by_id(&state.db, id).await?;

    let page = ManufacturerFormPage {
        user: NavUser::from(&req_driver),
        form: &ManufacturerForm::from(&manufacturer),
        errors: &FormErrors::default(),
        object: Some(ManufacturerDto::from(manufacturer)),
    };

    render_form(&state, StatusCode::OK, &page)
}

/// Updates a manufacturer, redirecting to the list on success
pub async fn update_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedForm { data, mut errors }: ValidatedForm<ManufacturerForm>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let manufacturer = repository::find_by_id(&state.db, id).await?;

    check_unique_name(&state, &data, Some(id), &mut errors).await?;

    if errors.is_empty() {
        match repository::update_manufacturer(&state.db, id, &data).await {
            Ok(_) => {
                info!("[WEB] manufacturer {} updated", id);
                return Ok(found(LIST_URL));
            }
            Err(e) if e.unique_violation().is_some() => {
                errors.add("name", MANUFACTURER_NAME_IN_USE)
            }
            Err(e) => return Err(e.into()),
        }
    }

    let page = ManufacturerFormPage {
        user: NavUser::from(&req_driver),
        form: &data,
        errors: &errors,
        object: Some(ManufacturerDto::from(manufacturer)),
    };

    render_form(&state, StatusCode::UNPROCESSABLE_ENTITY, &page)
}

pub async fn delete_manufacturer_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let manufacturer = repository::find_by_id(&state.db, id).await?;
    let num_cars = repository::count_cars(&state.db, id).await?;

    let page = ManufacturerConfirmDeletePage {
        user: NavUser::from(&req_driver),
        object: ManufacturerDto::from(manufacturer),
        num_cars,
    };

    state
        .templates
        .render(templates::MANUFACTURER_CONFIRM_DELETE, &page)
}

/// Deletes a manufacturer and every car it made
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, (StatusCode, SimpleError)> {
    repository::delete_manufacturer(&state.db, id).await?;

    info!("[WEB] manufacturer {} deleted", id);

    Ok(found(LIST_URL))
}
