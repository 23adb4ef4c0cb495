//! Domain model types.

pub mod database;
pub mod principal;

pub use database::{ConnectionConfig, DatabaseType};
pub use principal::{PlanCode, Principal, Subscription, UserType};
