use clinic_core::{database_location_from_env_value, ClinicServices, CoreConfig, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Main entry point for the clinic records service
///
/// Opens (and migrates) the SQLite database, then serves the REST API with its
/// OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `CLINIC_DATABASE_PATH`: SQLite database file, or `:memory:` (default: "clinic.db")
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the database cannot be opened or migrated,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_run=info".parse()?)
                .add_directive("clinic_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database =
        database_location_from_env_value(std::env::var("CLINIC_DATABASE_PATH").ok());
    let cfg = CoreConfig::new(database)?;
    let store = Store::open(&cfg)?;

    let rest_addr =
        std::env::var("CLINIC_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    tracing::info!("++ Starting clinic REST on {}", rest_addr);

    let app = api_rest::router(ClinicServices::new(store));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
