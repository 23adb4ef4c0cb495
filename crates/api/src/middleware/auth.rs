//! Bearer token authentication middleware.
//!
//! Every request gets a [`Principal`] in its extensions. Requests
//! without a valid token proceed as the anonymous principal; route
//! guards decide what anonymity may do.

use std::str::FromStr;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use domain::models::{PlanCode, Principal, Subscription, UserType};
use shared::jwt::Claims;
use tracing::{debug, warn};

use crate::app::AppState;
use crate::error::ApiError;

/// Builds the request principal from verified token claims.
///
/// An unknown role tag demotes to the least-privileged role and an
/// unknown plan code counts as no subscription, so a newer identity
/// service never escalates privileges here.
pub(crate) fn principal_from_claims(claims: &Claims) -> Principal {
    let user_type = UserType::from_str(&claims.user_type).unwrap_or_else(|e| {
        warn!("Token with unknown role, demoting to staff: {}", e);
        UserType::Staff
    });

    let subscription = claims.plan_code.as_deref().and_then(|code| {
        match PlanCode::from_str(code) {
            Ok(plan_code) => Some(Subscription { plan_code }),
            Err(e) => {
                warn!("Token with unknown plan code, ignoring: {}", e);
                None
            }
        }
    });

    Principal {
        authenticated: true,
        user_type,
        subscription,
    }
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Middleware attaching a principal to every request.
pub async fn attach_principal(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let principal = match bearer_token(&req) {
        Some(token) => match state.verifier.validate_token(token) {
            Ok(claims) => principal_from_claims(&claims),
            Err(e) => {
                debug!("Rejected bearer token: {}", e);
                Principal::anonymous()
            }
        },
        None => Principal::anonymous(),
    };

    req.extensions_mut().insert(principal);
    next.run(req).await
}

/// Guard for admin-only routes. Runs after [`attach_principal`].
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let principal = req
        .extensions()
        .get::<Principal>()
        .cloned()
        .unwrap_or_else(Principal::anonymous);

    if !principal.authenticated {
        return Err(ApiError::Unauthorized("Authentication required".into()));
    }
    if principal.user_type != UserType::Admin {
        return Err(ApiError::Forbidden("Administrator access required".into()));
    }
    Ok(next.run(req).await)
}
