//! Credential verification.
//!
//! Checks an email/password pair against the user store. The three ways this
//! can fail — unknown email, account without a password (externally
//! authenticated), wrong password — all collapse into the same `Ok(None)`,
//! so a caller cannot tell whether the account exists. No retry or lockout
//! logic lives here.

use sqlx::PgPool;

use super::password::{verify_password, PasswordError};
use crate::models::user::{User, UserProfile};

/// Looks up the user by exact email and verifies the supplied password
/// against the stored hash.
///
/// Returns the minimal identity on a match and `None` on any rejection.
/// `Err` is reserved for store failures and corrupt stored hashes.
pub async fn verify_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<UserProfile>, CredentialError> {
    let Some(user) = User::find_by_email(pool, email).await? else {
        return Ok(None);
    };

    let Some(ref hash) = user.password_hash else {
        // Externally-authenticated account; a password login can never match.
        return Ok(None);
    };

    if verify_password(password, hash)? {
        Ok(Some(user.into_profile()))
    } else {
        Ok(None)
    }
}

/// Error type for credential verification
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}
