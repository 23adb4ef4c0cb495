//! Live connectivity checks against candidate database servers.

use std::time::Duration;

use async_trait::async_trait;
use domain::models::ConnectionConfig;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgConnection};
use thiserror::Error;

/// Default cap on a single connection attempt.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for connection probing. Only ever surfaced as a log
/// line; the configurator reports probe outcomes as a boolean.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Connection attempt failed: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Connection attempt timed out after {0:?}")]
    Timeout(Duration),
}

/// Attempts an authenticated session with candidate parameters.
#[async_trait]
pub trait ConnectionProbe: Send + Sync {
    /// Opens a connection with all five parameters and closes it.
    /// Succeeds only on a fully established, authenticated session.
    async fn probe(&self, config: &ConnectionConfig) -> Result<(), ProbeError>;
}

/// [`ConnectionProbe`] backed by a real PostgreSQL connection attempt.
#[derive(Debug, Clone)]
pub struct PgConnectionProbe {
    timeout: Duration,
}

impl PgConnectionProbe {
    /// The timeout must be finite; a wedged server must not hang an
    /// admin request indefinitely.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for PgConnectionProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl ConnectionProbe for PgConnectionProbe {
    async fn probe(&self, config: &ConnectionConfig) -> Result<(), ProbeError> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password)
            .disable_statement_logging();

        let conn = tokio::time::timeout(self.timeout, PgConnection::connect_with(&options))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        // Graceful close; a failed close still tears the socket down on drop.
        conn.close().await?;
        Ok(())
    }
}
