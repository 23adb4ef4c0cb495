//! HTTP route handlers.

pub mod context;
pub mod database_setup;
pub mod health;
