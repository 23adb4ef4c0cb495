//! Database connection configuration domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Database server flavor.
///
/// Only PostgreSQL is implemented today; the enum keeps the persisted
/// document forward compatible if another engine is ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Postgresql,
}

impl DatabaseType {
    /// Driver identifier written into the active binding's `ENGINE` slot.
    pub fn engine(&self) -> &'static str {
        match self {
            Self::Postgresql => "postgres",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgresql => write!(f, "postgresql"),
        }
    }
}

/// Connection parameters for the application database.
///
/// Persisted verbatim to `database_config.json`: the serialized field
/// names (`type`, `host`, `port`, `name`, `user`, `password`) are part
/// of the on-disk format and must not change. Readers ignore unknown
/// keys so newer writers stay compatible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ConnectionConfig {
    #[serde(rename = "type")]
    pub db_type: DatabaseType,

    #[validate(custom(function = "shared::validation::validate_host"))]
    pub host: String,

    #[validate(custom(function = "shared::validation::validate_port"))]
    pub port: u16,

    #[validate(custom(function = "shared::validation::validate_db_identifier"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_db_identifier"))]
    pub user: String,

    /// May be empty for trust-authenticated local servers.
    #[serde(default)]
    pub password: String,
}
