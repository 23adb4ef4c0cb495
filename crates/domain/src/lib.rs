//! Domain models and business rules for the accounting backend.
//!
//! This crate is framework-free: connection configuration records,
//! subscription and principal types, and the entitlement rules that
//! gate the production module.

pub mod models;
pub mod services;
