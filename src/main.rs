use daily_deals::{
    config::{database, seed},
    errors::Result,
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Load seed configuration
    let config_path = env::var("DEALS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let seed_config = seed::load_config(&config_path)
        .inspect_err(|e| error!("Failed to load {}: {}", config_path, e))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed reference data
    let report = seed::seed_reference_data(&db, &seed_config)
        .await
        .inspect_err(|e| error!("Failed to seed reference data: {}", e))?;

    info!(
        cities = report.cities_created,
        categories = report.categories_created,
        "Database ready"
    );
    Ok(())
}
