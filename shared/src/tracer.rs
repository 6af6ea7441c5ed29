use tracing_subscriber::{fmt, prelude::__tracing_subscriber_SubscriberExt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

/// Initializes application tracing, printing spans and events to stdout.
///
/// the verbosity is controlled by the `RUST_LOG` env var, in development
/// events are printed in the human friendly `pretty` format, otherwise in
/// a compact single line format to be shipped by the log collector
pub fn init(service_name: &str, is_development: bool) -> Result<(), SetGlobalDefaultError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if is_development {
        let subscriber = Registry::default()
            .with(filter)
            .with(fmt::layer().pretty().with_target(false));

        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = Registry::default()
            .with(filter)
            .with(fmt::layer().compact().with_ansi(false));

        tracing::subscriber::set_global_default(subscriber)?;
    }

    println!("[TRACER] initialized as service: {}", service_name);
    Ok(())
}

pub use tracing::subscriber::SetGlobalDefaultError;
