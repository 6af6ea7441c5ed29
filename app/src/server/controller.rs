use super::templates::Templates;
use crate::modules::{auth, auth::service::AuthService, car, driver, index, manufacturer};
use axum::{body::Body, routing::get, Router};
use http::{Request, StatusCode};
use rand_chacha::ChaCha8Rng;
use rand_core::{OsRng, RngCore, SeedableRng};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

/// The main application state, this is cloned for every HTTP
/// request and thus its fields should contain types that are cheap
/// to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth_service: AuthService,
    pub templates: Templates,
}

impl AppState {
    /// builds the state, compiling the page templates
    pub fn new(db: DatabaseConnection, bcrypt_cost: u32) -> anyhow::Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(OsRng.next_u64());

        Ok(AppState {
            db: db.clone(),
            auth_service: AuthService::new(db, rng, bcrypt_cost),
            templates: Templates::new()?,
        })
    }
}

/// Creates the main axum router/controller to be served over http
pub fn new(state: AppState) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!("request: {} {}", request.method(), request.uri().path())
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let global_middlewares = ServiceBuilder::new().layer(tracing_layer);

    Router::new()
        .route("/healthcheck", get(healthcheck))
        .merge(auth::routes::create_router(state.clone()))
        .merge(index::routes::create_router(state.clone()))
        .merge(manufacturer::routes::create_router(state.clone()))
        .merge(car::routes::create_router(state.clone()))
        .merge(driver::routes::create_router(state.clone()))
        .layer(global_middlewares)
        .with_state(state)
}

pub async fn healthcheck() -> StatusCode {
    StatusCode::OK
}
