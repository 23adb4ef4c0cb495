use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use persistence::config_store::JsonConfigStore;
use persistence::configurator::DatabaseConfigurator;
use persistence::db::DbHandle;
use persistence::migrate::SqlxMigrationRunner;
use persistence::probe::PgConnectionProbe;
use persistence::registry::SettingsRegistry;
use shared::jwt::JwtVerifier;

use crate::config::Config;
use crate::middleware::{attach_principal, require_admin};
use crate::routes::{context, database_setup, health};

/// Configurator wiring used by the running server.
pub type Configurator =
    DatabaseConfigurator<JsonConfigStore, PgConnectionProbe, SqlxMigrationRunner>;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbHandle,
    pub config: Arc<Config>,
    pub registry: Arc<SettingsRegistry>,
    pub configurator: Arc<Configurator>,
    pub verifier: Arc<JwtVerifier>,
}

pub fn create_app(
    config: Config,
    pool: DbHandle,
    configurator: Arc<Configurator>,
    verifier: Arc<JwtVerifier>,
) -> Router {
    let config = Arc::new(config);
    let registry = configurator.registry().clone();

    let state = AppState {
        pool,
        config: config.clone(),
        registry,
        configurator,
        verifier,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Template context (anonymous allowed, principal attached)
    let context_routes = Router::new()
        .route("/api/v1/context", get(context::template_context))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            attach_principal,
        ));

    // Admin database setup routes (require administrator role)
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/database",
            get(database_setup::get_database_config).put(database_setup::save_database_config),
        )
        .route(
            "/api/v1/admin/database/test",
            post(database_setup::test_database_config),
        )
        // Admin guard runs after the principal is attached
        .route_layer(middleware::from_fn(require_admin))
        // Principal attachment runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            attach_principal,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(context_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
