//! Authentication and authorization.
//!
//! - `password`: Argon2id hashing and verification
//! - `credentials`: email/password verification against the user store
//! - `session`: signed session tokens (mint, parse, profile refresh)
//! - `authorization`: the `Role` enum and shared role predicates
//! - `guard`: the static route policy table for protected page prefixes
//! - `middleware`: Axum layers that turn a session cookie into request context

pub mod authorization;
pub mod credentials;
pub mod guard;
pub mod middleware;
pub mod password;
pub mod session;
