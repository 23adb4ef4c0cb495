//! Schema migration runner.
//!
//! Migrations are embedded at compile time and run against whatever
//! binding is currently active, either on startup or right after an
//! admin rewires the database connection.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::registry::DatabaseBinding;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("src/migrations");

/// Error type for migration runs.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Could not connect for migration: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Brings the schema of the bound database to the declared version.
#[async_trait]
pub trait MigrationRunner: Send + Sync {
    async fn run(&self, binding: &DatabaseBinding) -> Result<(), MigrationError>;
}

/// [`MigrationRunner`] applying the embedded sqlx migrations.
#[derive(Debug, Clone, Default)]
pub struct SqlxMigrationRunner;

#[async_trait]
impl MigrationRunner for SqlxMigrationRunner {
    async fn run(&self, binding: &DatabaseBinding) -> Result<(), MigrationError> {
        // The migrator acquires from a pool; one connection suffices.
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(binding.connect_options())
            .await?;
        let result = MIGRATOR.run(&pool).await;
        // Close regardless of the migration outcome.
        pool.close().await;
        result?;
        Ok(())
    }
}
