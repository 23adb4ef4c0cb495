//! Database connection configurator.
//!
//! Orchestrates the admin reconfiguration workflow: probe candidate
//! parameters, persist them durably, rebind the live settings
//! registry, and trigger schema migration. The three side-effectful
//! collaborators sit behind narrow traits so each step is
//! independently testable.

use std::sync::Arc;

use domain::models::ConnectionConfig;
use tracing::{debug, info, warn};

use crate::config_store::{ConfigStore, ConfigStoreError};
use crate::migrate::MigrationRunner;
use crate::probe::ConnectionProbe;
use crate::registry::{DatabaseBinding, SettingsRegistry, DEFAULT_ALIAS};

/// Result of applying a configuration to the running process.
///
/// The binding update itself cannot fail; only the follow-up migration
/// can, and that failure is non-fatal. `migrations_applied == false`
/// means the operator must re-run migrations manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub migrations_applied: bool,
}

/// Validates, persists, and hot-applies database connection parameters.
///
/// Not safe under concurrent invocation by two administrators; the
/// application gates it behind a single admin screen. The atomic file
/// replace in the store is the only multi-writer defense.
pub struct DatabaseConfigurator<S, P, M> {
    store: S,
    probe: P,
    migrator: M,
    registry: Arc<SettingsRegistry>,
}

impl<S, P, M> DatabaseConfigurator<S, P, M>
where
    S: ConfigStore,
    P: ConnectionProbe,
    M: MigrationRunner,
{
    pub fn new(store: S, probe: P, migrator: M, registry: Arc<SettingsRegistry>) -> Self {
        Self {
            store,
            probe,
            migrator,
            registry,
        }
    }

    /// Attempts a real connection with the candidate parameters.
    ///
    /// Idempotent, no persistent effect. Every failure mode
    /// (authentication, DNS, refusal, wrong database, timeout) comes
    /// back as `false` with a diagnostic log line.
    pub async fn test(&self, config: &ConnectionConfig) -> bool {
        match self.probe.probe(config).await {
            Ok(()) => {
                debug!(host = %config.host, port = config.port, name = %config.name,
                    "Database connection test succeeded");
                true
            }
            Err(e) => {
                warn!(host = %config.host, port = config.port, name = %config.name,
                    "Database connection test failed: {}", e);
                false
            }
        }
    }

    /// Reads the persisted configuration.
    pub fn load(&self) -> Result<Option<ConnectionConfig>, ConfigStoreError> {
        self.store.load()
    }

    /// Persists `config` and applies it to the running process.
    ///
    /// A persist failure propagates and leaves the previous binding
    /// and file intact. No validation happens here; callers are
    /// expected to [`test`](Self::test) first.
    pub async fn save(&self, config: &ConnectionConfig) -> Result<ApplyOutcome, ConfigStoreError> {
        self.store.save(config)?;
        info!("Database configuration persisted");
        Ok(self.apply(config).await)
    }

    /// Rebinds the `default` registry entry and runs migrations.
    ///
    /// The binding change commits before migration starts and is not
    /// rolled back on migration failure: the migration needs the new
    /// binding to run at all, and the operator retries migrations
    /// separately.
    pub async fn apply(&self, config: &ConnectionConfig) -> ApplyOutcome {
        let binding = DatabaseBinding::from_config(config);
        self.registry.set(DEFAULT_ALIAS, binding.clone());
        info!(host = %binding.host, port = binding.port, name = %binding.name,
            "Active database binding updated");

        match self.migrator.run(&binding).await {
            Ok(()) => ApplyOutcome {
                migrations_applied: true,
            },
            Err(e) => {
                warn!("Migration failed after rebinding, re-run migrations manually: {}", e);
                ApplyOutcome {
                    migrations_applied: false,
                }
            }
        }
    }

    /// The registry this configurator mutates.
    pub fn registry(&self) -> &Arc<SettingsRegistry> {
        &self.registry
    }
}
