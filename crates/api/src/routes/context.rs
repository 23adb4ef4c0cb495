//! Per-request template context endpoint.
//!
//! The frontend merges this payload into every template render, the
//! way the old server-rendered app merged context-processor output.

use axum::{Extension, Json};
use domain::models::Principal;
use domain::services::entitlement::{evaluate, EntitlementDecision};

/// GET /api/v1/context
///
/// Returns the entitlement flags for the current principal. Anonymous
/// requests get a denial, not a 401; templates render either way.
pub async fn template_context(
    Extension(principal): Extension<Principal>,
) -> Json<EntitlementDecision> {
    Json(evaluate(&principal))
}
