use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use clinicals_core::{database_location_from_env_value, CoreConfig, Repositories};

/// Main entry point for the clinicals service
///
/// Opens the configured database and serves the REST API.
///
/// # Environment Variables
/// - `CLINICALS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CLINICALS_DB_PATH`: SQLite database file, or `:memory:` (default: "clinicals.db")
/// - `RUST_LOG`: log filter (default adds "clinicals_run=info")
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, storage or the listener fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinicals_run=info".parse()?)
                .add_directive("clinicals_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CLINICALS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let database = database_location_from_env_value(std::env::var("CLINICALS_DB_PATH").ok());
    let cfg = CoreConfig::new(database)?;

    let repos = Repositories::open(&cfg)?;
    let app = api_rest::router(AppState::new(repos));

    tracing::info!("++ Starting clinicals REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
