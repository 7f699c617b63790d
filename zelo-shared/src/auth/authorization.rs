//! Role-based authorization.
//!
//! The site knows exactly two roles, ADMIN and MEMBER, modelled as a closed
//! enum rather than free-form strings so a role check can never typo its way
//! into granting access. All endpoints that gate on role go through the
//! predicates here instead of comparing inline.

use serde::{Deserialize, Serialize};

use super::session::SessionClaims;

/// Account role. Mutually exclusive; every user has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "role", rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Authenticated but the role does not permit the operation
    #[error("Forbidden")]
    InsufficientRole,

    /// A self-targeted action that is disallowed (own role change, own delete)
    #[error("{0}")]
    SelfActionDenied(&'static str),
}

/// Requires the session to carry the ADMIN role.
pub fn require_admin(claims: &SessionClaims) -> Result<(), AuthzError> {
    if claims.role == Role::Admin {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole)
    }
}
