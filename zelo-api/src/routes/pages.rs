//! Dashboard entry points behind the route guard.
//!
//! These handlers only run when the guard has already allowed the request,
//! so they can rely on the session claims being present in extensions.

use crate::response::{success, Envelope};
use axum::{Extension, Json};
use serde_json::json;
use zelo_shared::auth::session::SessionClaims;

/// `GET /dashboard` — the member dashboard.
pub async fn member_dashboard(
    Extension(claims): Extension<SessionClaims>,
) -> Json<Envelope<serde_json::Value>> {
    success(
        "Member dashboard",
        json!({
            "id": claims.sub,
            "name": claims.name,
            "email": claims.email,
            "role": claims.role,
        }),
    )
}

/// `GET /admin/dashboard` — the admin dashboard.
pub async fn admin_dashboard(
    Extension(claims): Extension<SessionClaims>,
) -> Json<Envelope<serde_json::Value>> {
    success(
        "Admin dashboard",
        json!({
            "id": claims.sub,
            "name": claims.name,
            "email": claims.email,
            "role": claims.role,
        }),
    )
}
