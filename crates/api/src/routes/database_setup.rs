//! Admin database configuration endpoints.
//!
//! Standalone installations point the application at their own
//! PostgreSQL server through these routes: read the current binding,
//! test candidate parameters, then save them. All three require the
//! administrator role.

use axum::{extract::State, Json};
use domain::models::ConnectionConfig;
use persistence::db::create_lazy_pool;
use persistence::registry::DatabaseBinding;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Current connection parameters with the password redacted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CurrentDatabaseResponse {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Outcome of a connection test.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TestConnectionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of saving a configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SaveDatabaseResponse {
    pub saved: bool,
    pub migrations_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/v1/admin/database
///
/// Returns the active binding, password redacted. `configured` is
/// false until either a persisted configuration was loaded at startup
/// or an administrator saved one.
pub async fn get_database_config(State(state): State<AppState>) -> Json<CurrentDatabaseResponse> {
    let response = match state.registry.default_binding() {
        Some(binding) => CurrentDatabaseResponse {
            configured: true,
            engine: Some(binding.engine),
            host: Some(binding.host),
            port: Some(binding.port),
            name: Some(binding.name),
            user: Some(binding.user),
        },
        None => CurrentDatabaseResponse {
            configured: false,
            engine: None,
            host: None,
            port: None,
            name: None,
            user: None,
        },
    };
    Json(response)
}

/// POST /api/v1/admin/database/test
///
/// Attempts a real connection with the candidate parameters. Failures
/// come back as `success: false` with an inline message, never as an
/// error status.
pub async fn test_database_config(
    State(state): State<AppState>,
    Json(config): Json<ConnectionConfig>,
) -> Result<Json<TestConnectionResponse>, ApiError> {
    config.validate()?;

    let success = state.configurator.test(&config).await;
    let message = (!success)
        .then(|| "Failed to connect to database. Please check your settings.".to_string());

    Ok(Json(TestConnectionResponse { success, message }))
}

/// PUT /api/v1/admin/database
///
/// Persists the configuration, hot-applies it, and swaps the live pool
/// onto the new binding. Callers are expected to test first. A
/// migration failure still counts as saved; the response carries the
/// banner telling the operator to re-run migrations.
pub async fn save_database_config(
    State(state): State<AppState>,
    Json(config): Json<ConnectionConfig>,
) -> Result<Json<SaveDatabaseResponse>, ApiError> {
    config.validate()?;

    let outcome = state.configurator.save(&config).await?;

    // Rebind the data-access layer; connections open on first use
    let binding = DatabaseBinding::from_config(&config);
    let pool = create_lazy_pool(
        binding.connect_options(),
        &state.config.database.pool_settings(),
    );
    state.pool.rebind(pool).await;
    info!(host = %binding.host, name = %binding.name, "Connection pool rebound");

    let message = (!outcome.migrations_applied)
        .then(|| "Configuration saved; migrations must be re-run.".to_string());

    Ok(Json(SaveDatabaseResponse {
        saved: true,
        migrations_applied: outcome.migrations_applied,
        message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_database_response_redacts_password() {
        let response = CurrentDatabaseResponse {
            configured: true,
            engine: Some("postgres".to_string()),
            host: Some("10.0.0.5".to_string()),
            port: Some(5432),
            name: Some("acct".to_string()),
            user: Some("u".to_string()),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"host\":\"10.0.0.5\""));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_unconfigured_response_omits_fields() {
        let response = CurrentDatabaseResponse {
            configured: false,
            engine: None,
            host: None,
            port: None,
            name: None,
            user: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, "{\"configured\":false}");
    }

    #[test]
    fn test_failed_test_response_has_inline_message() {
        let response = TestConnectionResponse {
            success: false,
            message: Some("Failed to connect to database. Please check your settings.".to_string()),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("check your settings"));
    }

    #[test]
    fn test_save_response_with_pending_migrations() {
        let response = SaveDatabaseResponse {
            saved: true,
            migrations_applied: false,
            message: Some("Configuration saved; migrations must be re-run.".to_string()),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"saved\":true"));
        assert!(json.contains("\"migrations_applied\":false"));
        assert!(json.contains("re-run"));
    }
}
