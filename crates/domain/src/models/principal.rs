//! Principal and subscription domain models.

use serde::{Deserialize, Serialize};

/// Subscription tier of a company.
///
/// Closed enumeration; plan-gated features check membership in the
/// plan sets declared in `services::entitlement`, never these variants
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanCode {
    Trial,
    Basic,
    Standard,
    Deluxe,
    Premium,
}

impl std::str::FromStr for PlanCode {
    type Err = UnknownPlanCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRIAL" => Ok(Self::Trial),
            "BASIC" => Ok(Self::Basic),
            "STANDARD" => Ok(Self::Standard),
            "DELUXE" => Ok(Self::Deluxe),
            "PREMIUM" => Ok(Self::Premium),
            other => Err(UnknownPlanCode(other.to_string())),
        }
    }
}

/// Error for plan codes outside the closed enumeration.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown plan code: {0}")]
pub struct UnknownPlanCode(pub String);

/// Role tag of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Admin,
    Accountant,
    Staff,
}

impl std::str::FromStr for UserType {
    type Err = UnknownUserType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "ACCOUNTANT" => Ok(Self::Accountant),
            "STAFF" => Ok(Self::Staff),
            other => Err(UnknownUserType(other.to_string())),
        }
    }
}

/// Error for role tags outside the known set.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown user type: {0}")]
pub struct UnknownUserType(pub String);

/// The subscription attached to a principal's company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan_code: PlanCode,
}

/// Read-only view of the authenticated subject of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub authenticated: bool,
    pub user_type: UserType,
    /// Absent when the company has no subscription record yet.
    pub subscription: Option<Subscription>,
}

impl Principal {
    /// The principal for requests without a valid session.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_type: UserType::Staff,
            subscription: None,
        }
    }
}
