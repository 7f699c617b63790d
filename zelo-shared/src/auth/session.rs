//! Stateless session tokens.
//!
//! A session is a signed JWT (HS256) carried in a cookie. It is minted at
//! login, reconstructed from the cookie on every request, and never stored
//! server-side. Claims carry the user's id and role (for authorization) plus
//! name and email (for display).
//!
//! Profile updates refresh the active session without re-authentication, but
//! only through [`ProfilePatch`] — the patch type has no way to express a new
//! role or id, so those claims cannot be rewritten through the refresh path.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::authorization::Role;

/// Issuer claim stamped into every session token.
const ISSUER: &str = "zelo";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Any parse failure: bad signature, expiry, wrong issuer, garbage input.
    /// Callers treat this uniformly as "no session".
    #[error("Invalid session token: {0}")]
    InvalidToken(String),
}

/// Claims embedded in the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Display name
    pub name: Option<String>,

    /// Email address
    pub email: String,

    /// Account role, used by the route guard and endpoint checks
    pub role: Role,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Partial identity patch merged into an active session.
///
/// Deliberately limited to display fields. Role and id are not present and
/// therefore cannot be patched without full re-authentication.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl SessionClaims {
    /// Creates claims for a freshly authenticated identity.
    pub fn new(
        user_id: Uuid,
        name: Option<String>,
        email: String,
        role: Role,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            name,
            email,
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Merges a profile patch into the claims, keeping the original expiry.
    ///
    /// Only name and email can change here; `sub` and `role` are untouched by
    /// construction.
    pub fn merge_profile(&self, patch: &ProfilePatch) -> Self {
        let mut claims = self.clone();
        if let Some(ref name) = patch.name {
            claims.name = Some(name.clone());
        }
        if let Some(ref email) = patch.email {
            claims.email = email.clone();
        }
        claims
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a session token.
pub fn mint_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies signature, expiry and issuer, returning the embedded claims.
///
/// Every failure mode collapses into [`SessionError::InvalidToken`]; the
/// request is simply unauthenticated, nothing propagates past the boundary.
pub fn parse_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| SessionError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn sample_claims() -> SessionClaims {
        SessionClaims::new(
            Uuid::new_v4(),
            Some("Jane".to_string()),
            "jane@example.com".to_string(),
            Role::Member,
            Duration::hours(1),
        )
    }

    #[test]
    fn test_mint_then_parse_roundtrip() {
        let claims = sample_claims();
        let token = mint_token(&claims, SECRET).expect("should mint");

        let parsed = parse_token(&token, SECRET).expect("should parse");
        assert_eq!(parsed.sub, claims.sub);
        assert_eq!(parsed.name, claims.name);
        assert_eq!(parsed.email, claims.email);
        assert_eq!(parsed.role, Role::Member);
        assert_eq!(parsed.iss, "zelo");
    }

    #[test]
    fn test_parse_with_wrong_secret_fails() {
        let token = mint_token(&sample_claims(), SECRET).expect("should mint");
        assert!(parse_token(&token, "a-completely-different-secret-key!!").is_err());
    }

    #[test]
    fn test_parse_tampered_token_fails() {
        let token = mint_token(&sample_claims(), SECRET).expect("should mint");
        // Flip a character inside the payload segment.
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'a' { b'b' } else { b'a' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(parse_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_parse_expired_token_fails() {
        let claims = SessionClaims::new(
            Uuid::new_v4(),
            None,
            "old@example.com".to_string(),
            Role::Member,
            Duration::seconds(-3600),
        );
        assert!(claims.is_expired());

        let token = mint_token(&claims, SECRET).expect("should mint");
        assert!(parse_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_token("not-a-jwt", SECRET).is_err());
        assert!(parse_token("", SECRET).is_err());
    }

    #[test]
    fn test_merge_profile_updates_display_fields_only() {
        let claims = sample_claims();
        let merged = claims.merge_profile(&ProfilePatch {
            name: Some("Janet".to_string()),
            email: Some("janet@example.com".to_string()),
        });

        assert_eq!(merged.name.as_deref(), Some("Janet"));
        assert_eq!(merged.email, "janet@example.com");
        // Identity and authorization claims survive untouched.
        assert_eq!(merged.sub, claims.sub);
        assert_eq!(merged.role, claims.role);
        assert_eq!(merged.exp, claims.exp);
    }

    #[test]
    fn test_merge_profile_empty_patch_is_identity() {
        let claims = sample_claims();
        let merged = claims.merge_profile(&ProfilePatch::default());
        assert_eq!(merged.name, claims.name);
        assert_eq!(merged.email, claims.email);
    }
}
