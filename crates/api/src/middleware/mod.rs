//! HTTP middleware components.

pub mod auth;
pub mod logging;

pub use auth::{attach_principal, require_admin};
