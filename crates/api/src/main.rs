use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use accounting_api::{app, config::Config, middleware};
use persistence::config_store::{ConfigStore, JsonConfigStore};
use persistence::configurator::DatabaseConfigurator;
use persistence::db::DbHandle;
use persistence::migrate::{SqlxMigrationRunner, MIGRATOR};
use persistence::probe::PgConnectionProbe;
use persistence::registry::{DatabaseBinding, SettingsRegistry, DEFAULT_ALIAS};
use shared::jwt::JwtVerifier;
use sqlx::postgres::PgConnectOptions;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting Accounting API v{}", env!("CARGO_PKG_VERSION"));

    // A previously saved database configuration overrides the bootstrap
    // URL. A corrupt file is a deployment problem and stops startup.
    let store = JsonConfigStore::new(&config.app.base_dir);
    let registry = Arc::new(SettingsRegistry::new());
    let connect_options = match store.load()? {
        Some(saved) => {
            info!("Using persisted database configuration");
            let binding = DatabaseBinding::from_config(&saved);
            let options = binding.connect_options();
            registry.set(DEFAULT_ALIAS, binding);
            options
        }
        None => config.database.url.parse::<PgConnectOptions>()?,
    };

    // Create database pool
    let pool =
        persistence::db::create_pool(connect_options, &config.database.pool_settings()).await?;

    // Run migrations
    info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;
    info!("Migrations completed");

    // Wire the configurator behind the admin setup endpoints
    let probe = PgConnectionProbe::new(Duration::from_secs(config.database.probe_timeout_secs));
    let configurator = Arc::new(DatabaseConfigurator::new(
        store,
        probe,
        SqlxMigrationRunner,
        registry,
    ));

    // Token verifier for the identity service's bearer tokens
    let verifier = Arc::new(JwtVerifier::with_leeway(
        &config.auth.public_key,
        config.auth.leeway_secs,
    )?);

    // Build application
    let addr = config.socket_addr()?;
    let app = app::create_app(config, DbHandle::new(pool), configurator, verifier);

    // Start server
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
