use super::dto::{
    CarConfirmDeletePage, CarDetailPage, CarDriverDto, CarDto, CarForm, CarFormPage, CarListPage,
    CarSearch, SEARCH_PLACEHOLDER,
};
use super::repository;
use crate::database::{
    filters::non_blank,
    pagination::{fetch_page, PAGE_SIZE},
};
use crate::modules::auth::middleware::{require_driver, RequestDriver};
use crate::modules::common::{
    dto::{search_query_suffix, NavUser},
    error_codes::{invalid_multiple_choice, INVALID_CHOICE},
    extractors::{DbConnection, ValidatedForm, ValidatedQuery},
    forms::FormErrors,
    responses::{found, SimpleError},
};
use crate::modules::{driver, manufacturer};
use crate::server::{controller::AppState, templates};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Extension, Router,
};
use entity::car;
use http::StatusCode;
use sea_orm::PaginatorTrait;
use tracing::info;

const LIST_URL: &str = "/cars/";

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/cars/", get(list_cars))
        .route("/cars/create/", get(create_car_page).post(create_car))
        .route("/cars/:id/", get(car_detail))
        .route("/cars/:id/update/", get(update_car_page).post(update_car))
        .route("/cars/:id/delete/", get(delete_car_page).post(delete_car))
        .route("/cars/:id/toggle-assign/", post(toggle_assign))
        .route_layer(axum::middleware::from_fn_with_state(state, require_driver))
}

/// Renders the car form with the select and checkbox options
async fn render_form(
    state: &AppState,
    status: StatusCode,
    req_driver: &entity::driver::Model,
    form: &CarForm,
    errors: &FormErrors,
    object: Option<CarDto>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let manufacturer_choices =
        manufacturer::repository::choices(&state.db, form.manufacturer_id()).await?;
    let driver_choices = driver::repository::choices(&state.db, &form.driver_ids()).await?;

    let page = CarFormPage {
        user: NavUser::from(req_driver),
        form,
        errors,
        manufacturer_choices,
        driver_choices,
        object,
    };

    let html = state.templates.render(templates::CAR_FORM, &page)?;
    Ok((status, html).into_response())
}

/// Checks the selected manufacturer and drivers exist, returning the selected ids
async fn check_choices(
    state: &AppState,
    form: &CarForm,
    errors: &mut FormErrors,
) -> Result<(i32, Vec<i32>), (StatusCode, SimpleError)> {
    let mut manufacturer_id = 0;

    if errors.field("manufacturer").is_empty() {
        let exists = match form.manufacturer_id() {
            Some(id) => manufacturer::repository::exists(&state.db, id).await?,
            None => false,
        };

        match form.manufacturer_id() {
            Some(id) if exists => manufacturer_id = id,
            _ => errors.add("manufacturer", INVALID_CHOICE),
        }
    }

    let driver_ids = form.driver_ids();
    let existing = driver::repository::existing_ids(&state.db, &driver_ids).await?;

    let invalid = form
        .drivers
        .iter()
        .find(|raw| super::dto::parse_id(raw).map_or(true, |id| !existing.contains(&id)));

    if let Some(raw) = invalid {
        errors.add("drivers", invalid_multiple_choice(raw));
    }

    Ok((manufacturer_id, driver_ids))
}

/// Lists cars by id, 5 per page
pub async fn list_cars(
    State(state): State<AppState>,
    DbConnection(db): DbConnection,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedQuery(query): ValidatedQuery<CarSearch>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let search = non_blank(query.model.as_deref());

    let paginator = repository::search(search).paginate(&db, PAGE_SIZE);
    let page = fetch_page(paginator, query.page.as_deref())
        .await?
        .map(CarDto::from);

    let list_page = CarListPage {
        user: NavUser::from(&req_driver),
        car_list: page.records,
        is_paginated: page.meta.is_paginated,
        page_obj: page.meta,
        search: search.map(String::from),
        search_placeholder: SEARCH_PLACEHOLDER,
        query_suffix: search_query_suffix("model", search),
    };

    state.templates.render(templates::CAR_LIST, &list_page)
}

/// Shows a car with its manufacturer and drivers
pub async fn car_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let (car, manufacturer) = repository::find_with_manufacturer(&state.db, id).await?;
    let drivers = repository::drivers_of(&state.db, &car).await?;

    let is_assigned = drivers.iter().any(|d| d.id == req_driver.id);

    let page = CarDetailPage {
        user: NavUser::from(&req_driver),
        car: CarDto::from((car, manufacturer)),
        drivers: drivers.into_iter().map(CarDriverDto::from).collect(),
        is_assigned,
    };

    state.templates.render(templates::CAR_DETAIL, &page)
}

pub async fn create_car_page(
    State(state): State<AppState>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Response, (StatusCode, SimpleError)> {
    render_form(
        &state,
        StatusCode::OK,
        &req_driver,
        &CarForm::default(),
        &FormErrors::default(),
        None,
    )
    .await
}

/// Creates a car, redirecting to the list on success
pub async fn create_car(
    State(state): State<AppState>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedForm { data, mut errors }: ValidatedForm<CarForm>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let (manufacturer_id, driver_ids) = check_choices(&state, &data, &mut errors).await?;

    if !errors.is_empty() {
        return render_form(
            &state,
            StatusCode::UNPROCESSABLE_ENTITY,
            &req_driver,
            &data,
            &errors,
            None,
        )
        .await;
    }

    let created =
        repository::create_car(&state.db, data.model.trim(), manufacturer_id, &driver_ids).await?;

    info!("[WEB] car {} created", created.id);

    Ok(found(LIST_URL))
}

pub async fn update_car_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let (car, manufacturer) = repository::find_with_manufacturer(&state.db, id).await?;
    let driver_ids = repository::driver_ids_of(&state.db, id).await?;

    let form = CarForm::from_model(&car, &driver_ids);

    render_form(
        &state,
        StatusCode::OK,
        &req_driver,
        &form,
        &FormErrors::default(),
        Some(CarDto::from((car, manufacturer))),
    )
    .await
}

/// Updates a car and replaces its drivers, redirecting to the list on success
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    ValidatedForm { data, mut errors }: ValidatedForm<CarForm>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let (car, manufacturer) = repository::find_with_manufacturer(&state.db, id).await?;

    let (manufacturer_id, driver_ids) = check_choices(&state, &data, &mut errors).await?;

    if !errors.is_empty() {
        return render_form(
            &state,
            StatusCode::UNPROCESSABLE_ENTITY,
            &req_driver,
            &data,
            &errors,
            Some(CarDto::from((car, manufacturer))),
        )
        .await;
    }

    repository::update_car(
        &state.db,
        id,
        data.model.trim(),
        manufacturer_id,
        &driver_ids,
    )
    .await?;

    info!("[WEB] car {} updated", id);

    Ok(found(LIST_URL))
}

pub async fn delete_car_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let car = repository::find_with_manufacturer(&state.db, id).await?;

    let page = CarConfirmDeletePage {
        user: NavUser::from(&req_driver),
        object: CarDto::from(car),
    };

    state.templates.render(templates::CAR_CONFIRM_DELETE, &page)
}

/// Deletes a car, its drivers are kept
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, (StatusCode, SimpleError)> {
    repository::delete_car(&state.db, id).await?;

    info!("[WEB] car {} deleted", id);

    Ok(found(LIST_URL))
}

/// Adds the signed in driver to the car drivers, or removes it if already assigned
pub async fn toggle_assign(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
) -> Result<Response, (StatusCode, SimpleError)> {
    let car: car::Model = repository::find_by_id(&state.db, id).await?;

    let assigned = repository::toggle_assignment(&state.db, car.id, req_driver.id).await?;

    info!(
        "[WEB] driver {} {} car {}",
        req_driver.id,
        if assigned { "assigned to" } else { "removed from" },
        car.id
    );

    Ok(found(&car.get_absolute_url()))
}
