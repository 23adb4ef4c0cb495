//! Persistence layer for the accounting backend.
//!
//! This crate contains:
//! - The database connection configurator and its collaborators
//! - The settings registry holding the active database binding
//! - Durable storage for connection parameters
//! - Connection pool management and embedded schema migrations

pub mod config_store;
pub mod configurator;
pub mod db;
pub mod migrate;
pub mod probe;
pub mod registry;
