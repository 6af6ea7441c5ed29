use chrono::Utc;
use entity::session;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::time::Duration;
use tracing::{error, info};

/// starts a tokio task that deletes all the expired driver sessions every `every`
pub fn start_clear_sessions_cronjob(db: DatabaseConnection, every: Duration) {
    info!("[CRON] clearing expired sessions every {} seconds", every.as_secs());

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);

        loop {
            interval.tick().await;

            let result = session::Entity::delete_many()
                .filter(session::Column::ExpiresAt.lt(Utc::now()))
                .exec(&db)
                .await;

            match result {
                Ok(r) if r.rows_affected > 0 => {
                    info!("[CRON] cleared {} expired sessions", r.rows_affected)
                }
                Ok(_) => {}
                Err(e) => error!("[CRON] failed to clear expired sessions: {}", e),
            }
        }
    });
}
