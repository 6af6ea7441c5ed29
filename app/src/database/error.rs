use crate::modules::common::responses::{internal_error_res, SimpleError};
use http::StatusCode;
use sea_orm::{DbErr, SqlErr};
use tracing::error;

/// Wrapper for seaorm errors.
///
/// This is useful for wrapping database errors and safely returning them from
/// axum route handlers without worrying about leaking sensitive information,
/// as it implements `Into<(StatusCode, SimpleError)>`
#[derive(Debug)]
pub struct DbError(pub DbErr);

impl DbError {
    /// The driver message of a unique constraint violation, it names the
    /// violated constraint or column
    pub fn unique_violation(&self) -> Option<String> {
        match self.0.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
            _ => None,
        }
    }
}

impl From<DbErr> for DbError {
    fn from(err: DbErr) -> Self {
        DbError(err)
    }
}

impl From<DbError> for (StatusCode, SimpleError) {
    fn from(err: DbError) -> Self {
        match err.0 {
            DbErr::RecordNotFound(_) => {
                (StatusCode::NOT_FOUND, SimpleError::entity_not_found())
            }

            e => {
                error!("[DB] {}", e);
                internal_error_res()
            }
        }
    }
}
