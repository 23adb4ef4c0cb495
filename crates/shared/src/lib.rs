//! Shared utilities and common types for the accounting backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Presentation arithmetic filters with fixed-point decimal semantics
//! - JWT bearer token verification
//! - Common validation logic

pub mod filters;
pub mod jwt;
pub mod validation;
