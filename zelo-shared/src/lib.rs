//! # Zelo Shared Library
//!
//! Shared types and business logic used by the Zelo API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and CRUD operations
//! - `auth`: Password hashing, session tokens, role checks, route guard
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
