//! Entitlement rules for the production module.
//!
//! Production features (bill of materials, work orders) ship in the
//! higher subscription tiers. The evaluator computes a single boolean
//! that the template layer merges into every request context.

use serde::Serialize;

use crate::models::{PlanCode, Principal, UserType};

/// Plans whose subscribers may use the production module.
///
/// The single authoritative declaration. Adding a tier (e.g.
/// ENTERPRISE) is a one-line change here; no call site enumerates plan
/// codes itself.
pub const PRODUCTION_PLANS: [PlanCode; 2] = [PlanCode::Deluxe, PlanCode::Premium];

/// Outcome of entitlement evaluation, merged into the template context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntitlementDecision {
    pub has_production_access: bool,
}

/// Decides whether the principal may see production-module features.
///
/// Rules in order, first positive wins:
/// 1. Unauthenticated principals get nothing.
/// 2. A subscription on a production-capable plan grants access.
/// 3. Administrators always have access, whatever their plan.
///
/// Total function: every principal shape yields a defined boolean.
pub fn evaluate(principal: &Principal) -> EntitlementDecision {
    if !principal.authenticated {
        return EntitlementDecision {
            has_production_access: false,
        };
    }

    let plan_grants = principal
        .subscription
        .map(|s| PRODUCTION_PLANS.contains(&s.plan_code))
        .unwrap_or(false);

    let admin_grants = principal.user_type == UserType::Admin;

    EntitlementDecision {
        has_production_access: plan_grants || admin_grants,
    }
}
