use super::{forms::FormErrors, responses::SimpleError};
use crate::server::controller::AppState;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use http::{request::Parts, StatusCode};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Wrapper struct that extracts from the request query exactly `axum::Query<T>`
/// but also requires T to impl `Validate`, if validation fails a bad request code
/// and simple error is returned
#[derive(Clone, Copy)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = (http::StatusCode, SimpleError);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(payload) => match payload.validate() {
                Ok(_) => Ok(ValidatedQuery(payload.0)),
                Err(e) => Err((StatusCode::BAD_REQUEST, SimpleError::from(e.to_string()))),
            },
            Err(rejection) => Err((rejection.status(), SimpleError::from(rejection.body_text()))),
        }
    }
}

/// Extracts a `application/x-www-form-urlencoded` body into `T` and validates it.
///
/// unlike `ValidatedQuery` a invalid form is not rejected, the field errors are
/// handed to the handler so it can render the form again with the messages next
/// to each field. Repeated keys (eg: checkbox lists) are collected into `Vec`s.
pub struct ValidatedForm<T> {
    pub data: T,
    pub errors: FormErrors,
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(data) = Form::<T>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let errors = match data.validate() {
            Ok(_) => FormErrors::default(),
            Err(e) => FormErrors::from(e),
        };

        Ok(ValidatedForm { data, errors })
    }
}

/// Helper to get a DB connection from the state
pub struct DbConnection(pub DatabaseConnection);

#[async_trait]
impl FromRequestParts<AppState> for DbConnection {
    type Rejection = (http::StatusCode, SimpleError);

    async fn from_request_parts(_: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(DbConnection(state.db.clone()))
    }
}
