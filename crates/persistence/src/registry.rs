//! In-process settings registry holding the active database binding.
//!
//! The data-access layer reads the `default` entry on every pool
//! (re)build. Mutation happens only through
//! [`crate::configurator::DatabaseConfigurator::apply`], at quiescent
//! points: process startup or an admin action no other request can
//! interleave with.

use std::collections::HashMap;
use std::sync::RwLock;

use domain::models::ConnectionConfig;
use serde::Serialize;
use sqlx::postgres::PgConnectOptions;

/// Logical name of the binding the data-access layer reads.
pub const DEFAULT_ALIAS: &str = "default";

/// Live connection parameters for one logical database.
///
/// Serialized keys are spelled the way the settings document always
/// spelled them, so existing tooling keeps parsing registry dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseBinding {
    #[serde(rename = "ENGINE")]
    pub engine: String,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "USER")]
    pub user: String,
    #[serde(rename = "PASSWORD")]
    pub password: String,
    #[serde(rename = "HOST")]
    pub host: String,
    #[serde(rename = "PORT")]
    pub port: u16,
}

impl DatabaseBinding {
    /// Translates a connection config into a binding, mapping the
    /// database type to its driver identifier.
    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self {
            engine: config.db_type.engine().to_string(),
            name: config.name.clone(),
            user: config.user.clone(),
            password: config.password.clone(),
            host: config.host.clone(),
            port: config.port,
        }
    }

    /// Builds driver connection options from the binding.
    ///
    /// Field-by-field, never through a URL string: the password is an
    /// opaque value and may contain characters (`@`, `/`, `:`, `#`)
    /// that a URL would require escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

/// Mutable mapping of logical database names to live bindings.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    entries: RwLock<HashMap<String, DatabaseBinding>>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the binding under `alias`.
    pub fn set(&self, alias: &str, binding: DatabaseBinding) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(alias.to_string(), binding);
    }

    /// Returns a snapshot of the binding under `alias`.
    pub fn get(&self, alias: &str) -> Option<DatabaseBinding> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(alias).cloned()
    }

    /// Returns a snapshot of the `default` binding.
    pub fn default_binding(&self) -> Option<DatabaseBinding> {
        self.get(DEFAULT_ALIAS)
    }
}
