use crate::modules::auth::session::{SessionId, SESSION_DAYS_DURATION};
use anyhow::{anyhow, Result};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use entity::{driver, session};
use rand_chacha::ChaCha8Rng;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, PartialEq, Eq)]
pub enum DriverFromCredentialsError {
    NotFound,
    InternalError,
    InvalidPassword,
}

#[derive(Clone)]
pub struct AuthService {
    rng: Arc<Mutex<ChaCha8Rng>>,
    db: DatabaseConnection,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, rng: ChaCha8Rng, hash_cost: u32) -> Self {
        AuthService {
            db,
            hash_cost,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// hashes a plain text password with the configured bcrypt cost
    pub fn hash_password(&self, plain: &str) -> Result<String> {
        Ok(hash(plain, self.hash_cost)?)
    }

    /// generates a new session token and creates a new session record on the DB for the driver
    pub async fn new_session(&self, driver_id: i32, client_user_agent: String) -> Result<SessionId> {
        let ses_token = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| anyhow!("session rng mutex poisoned"))?;

            SessionId::generate_new(&mut rng)
        };

        let now = Utc::now();

        let new_session = session::ActiveModel {
            session_token: Set(ses_token.into_database_value()),
            created_at: Set(now),
            expires_at: Set(now + Duration::days(SESSION_DAYS_DURATION)),
            user_agent: Set(client_user_agent),
            num_visits: Set(0),
            driver_id: Set(driver_id),
        };

        new_session.insert(&self.db).await?;

        Ok(ses_token)
    }

    /// deletes a session by its token
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        session::Entity::delete_many()
            .filter(session::Column::SessionToken.eq(session_id.into_database_value()))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// gets the driver and its session from the session token if the session is not expired
    pub async fn get_driver_from_session_id(
        &self,
        session_id: SessionId,
    ) -> Result<Option<(session::Model, driver::Model)>> {
        let result = session::Entity::find_by_id(session_id.into_database_value())
            .find_also_related(driver::Entity)
            .one(&self.db)
            .await?;

        match result {
            Some((ses, Some(driver))) if ses.expires_at > Utc::now() => Ok(Some((ses, driver))),
            _ => Ok(None),
        }
    }

    /// finds a driver from its username and plain text password, verifying the password
    pub async fn get_driver_from_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<driver::Model, DriverFromCredentialsError> {
        let driver = driver::Entity::find()
            .filter(driver::Column::Username.eq(username))
            .one(&self.db)
            .await
            .or(Err(DriverFromCredentialsError::InternalError))?
            .ok_or(DriverFromCredentialsError::NotFound)?;

        let pass_is_valid =
            verify(password, &driver.password).or(Err(DriverFromCredentialsError::InternalError))?;

        if !pass_is_valid {
            return Err(DriverFromCredentialsError::InvalidPassword);
        }

        Ok(driver)
    }

    /// sets the last login of a driver to the current time
    pub async fn touch_last_login(&self, driver_id: i32) -> Result<()> {
        driver::Entity::update_many()
            .col_expr(driver::Column::LastLogin, Expr::value(Utc::now()))
            .filter(driver::Column::Id.eq(driver_id))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// increments the home page visit counter of a session, returning the new value
    pub async fn increment_visits(&self, ses: &session::Model) -> Result<i32> {
        let txn = self.db.begin().await?;

        session::Entity::update_many()
            .col_expr(
                session::Column::NumVisits,
                Expr::col(session::Column::NumVisits).add(1),
            )
            .filter(session::Column::SessionToken.eq(ses.session_token.clone()))
            .exec(&txn)
            .await?;

        // the session snapshot may be stale when visits happen concurrently
        let num_visits: Option<i32> = session::Entity::find()
            .select_only()
            .column(session::Column::NumVisits)
            .filter(session::Column::SessionToken.eq(ses.session_token.clone()))
            .into_tuple()
            .one(&txn)
            .await?;

        txn.commit().await?;

        num_visits.ok_or_else(|| anyhow!("session not found when counting visits"))
    }
}
