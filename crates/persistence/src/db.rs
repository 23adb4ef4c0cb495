//! Database connection pool management.
//!
//! The live pool sits behind [`DbHandle`] so an admin reconfiguration
//! can rebind the data-access layer without a restart: after a save,
//! the API builds a pool for the new binding and swaps it in.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Pool sizing and timeout settings, independent of the binding.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 5,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        }
    }
}

fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
}

/// Creates a PostgreSQL connection pool, connecting eagerly.
pub async fn create_pool(
    options: PgConnectOptions,
    settings: &PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    pool_options(settings).connect_with(options).await
}

/// Creates a pool that connects on first acquire.
///
/// Used when rebinding after an admin save: construction cannot fail,
/// and the admin has already connection-tested the parameters.
pub fn create_lazy_pool(options: PgConnectOptions, settings: &PoolSettings) -> PgPool {
    pool_options(settings).connect_lazy_with(options)
}

/// Shared handle to the live pool.
///
/// Readers clone the current pool per operation; `rebind` swaps in a
/// pool for a new binding and closes the previous one.
#[derive(Clone)]
pub struct DbHandle {
    inner: Arc<RwLock<PgPool>>,
}

impl DbHandle {
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(RwLock::new(pool)),
        }
    }

    /// Snapshot of the current pool.
    pub async fn pool(&self) -> PgPool {
        self.inner.read().await.clone()
    }

    /// Replaces the live pool and closes the one it replaces.
    ///
    /// In-flight operations on the old pool finish on their own clone;
    /// new operations acquire from the new pool.
    pub async fn rebind(&self, pool: PgPool) {
        let previous = {
            let mut guard = self.inner.write().await;
            std::mem::replace(&mut *guard, pool)
        };
        previous.close().await;
    }
}
