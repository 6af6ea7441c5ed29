use sea_orm::DatabaseConnection;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};
use taxi_service::{config::app_config, cronjobs, database, server};
use tokio::task;
use tracing::{error, info};

#[tokio::main]
pub async fn main() {
    let cfg = app_config();

    shared::tracer::init("taxi_service", cfg.is_development).expect("failed to init tracer");

    let db = database::db::connect(&cfg.db_url).await;

    database::db::run_migrations(&db).await;

    cronjobs::start_clear_sessions_cronjob(db.clone(), Duration::from_secs(5 * 60));

    listen_to_shutdown_signals(!cfg.is_development, db.clone());

    let state = server::controller::AppState::new(db, cfg.bcrypt_cost)
        .unwrap_or_else(|e| panic!("[WEB] failed to build app state: {}", e));

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), cfg.http_port);
    info!("[WEB] soon listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|_| panic!("[WEB] failed to get address {}", addr));

    axum::serve(listener, server::controller::new(state))
        .await
        .unwrap_or_else(|_| panic!("[WEB] failed to serve app on address {}", addr));
}

/// Listen to shutdown signals `SIGINT` and `SIGTERM`, on a signal gracefully shutdowns down the application
fn listen_to_shutdown_signals(gracefully_shutdown: bool, db: DatabaseConnection) {
    let mut signals = Signals::new([SIGINT, SIGTERM]).expect("failed to setup signals hook");

    tokio::spawn(async move {
        let received = task::spawn_blocking(move || signals.forever().next())
            .await
            .ok()
            .flatten();

        if let Some(sig) = received {
            if gracefully_shutdown {
                info!("[APP] received signal: {}, shutting down", sig);

                info!("[APP] closing database connections");
                if let Err(e) = db.close().await {
                    error!("[DB] failed to close db connection: {}", e)
                }
            }

            std::process::exit(sig)
        }
    });
}
