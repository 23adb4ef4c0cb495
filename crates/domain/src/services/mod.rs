//! Domain services.

pub mod entitlement;
