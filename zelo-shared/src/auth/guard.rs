//! Route guard policy.
//!
//! A static, ordered table maps protected path prefixes to the access they
//! require. The first matching prefix wins. The decision function is pure so
//! the policy can be tested without a server; the Axum layer that applies it
//! lives in [`super::middleware`].
//!
//! Policy:
//!
//! | prefix       | requires                |
//! |--------------|-------------------------|
//! | `/admin`     | session with ADMIN role |
//! | `/dashboard` | session with any role   |
//!
//! A missing session redirects to the login page. A MEMBER on an admin path
//! is silently sent to the member dashboard, and an ADMIN on the member
//! dashboard is sent to the admin one; the two navigations never mix.

use super::{authorization::Role, session::SessionClaims};

/// Access requirement for a protected prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated session
    AnyRole,
    /// ADMIN sessions only
    AdminOnly,
}

/// Entry points the guard redirects to.
pub const LOGIN_PATH: &str = "/login";
pub const MEMBER_DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";

/// Ordered policy table; first matching prefix wins.
const POLICY: &[(&str, Access)] = &[
    ("/admin", Access::AdminOnly),
    ("/dashboard", Access::AnyRole),
];

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Run the handler.
    Allow,
    /// Short-circuit with a redirect; the handler never executes.
    Redirect(&'static str),
}

/// Applies the policy table to a request path and (possibly absent) session.
pub fn decide(path: &str, session: Option<&SessionClaims>) -> RouteDecision {
    let Some((_, access)) = POLICY.iter().find(|(prefix, _)| path.starts_with(prefix)) else {
        return RouteDecision::Allow;
    };

    let Some(claims) = session else {
        return RouteDecision::Redirect(LOGIN_PATH);
    };

    match access {
        Access::AdminOnly if claims.role != Role::Admin => {
            RouteDecision::Redirect(MEMBER_DASHBOARD_PATH)
        }
        // An ADMIN never lands on the member view.
        Access::AnyRole if claims.role == Role::Admin => {
            RouteDecision::Redirect(ADMIN_DASHBOARD_PATH)
        }
        _ => RouteDecision::Allow,
    }
}
