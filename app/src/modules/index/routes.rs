use super::dto::IndexPage;
use crate::database::error::DbError;
use crate::modules::auth::middleware::{require_driver, RequestDriver, RequestSession};
use crate::modules::common::{
    dto::NavUser,
    extractors::DbConnection,
    responses::{internal_error_res, SimpleError},
};
use crate::server::{controller::AppState, templates};
use axum::{extract::State, response::Html, routing::get, Extension, Router};
use entity::{car, driver, manufacturer};
use http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::error;

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route_layer(axum::middleware::from_fn_with_state(state, require_driver))
}

/// Home page, shows how many records of each kind exist and counts the visits
/// of the current session
pub async fn index(
    State(state): State<AppState>,
    DbConnection(db): DbConnection,
    Extension(RequestDriver(req_driver)): Extension<RequestDriver>,
    Extension(RequestSession(session)): Extension<RequestSession>,
) -> Result<Html<String>, (StatusCode, SimpleError)> {
    let num_drivers = driver::Entity::find()
        .count(&db)
        .await
        .map_err(DbError::from)?;

    let num_cars = car::Entity::find().count(&db).await.map_err(DbError::from)?;

    let num_manufacturers = manufacturer::Entity::find()
        .count(&db)
        .await
        .map_err(DbError::from)?;

    let num_visits = state
        .auth_service
        .increment_visits(&session)
        .await
        .map_err(|e| {
            error!("[WEB] failed to count session visit: {}", e);
            internal_error_res()
        })?;

    let page = IndexPage {
        user: NavUser::from(&req_driver),
        num_drivers,
        num_cars,
        num_manufacturers,
        num_visits,
    };

    state.templates.render(templates::INDEX, &page)
}
