//! API route handlers, organized by resource:
//!
//! - `health`: health check endpoint
//! - `auth`: register, login, logout
//! - `profile`: self-service profile update with session refresh
//! - `projects`, `users`, `testimonials`: CRUD endpoints
//! - `upload`: file upload collaborator
//! - `pages`: guard-protected dashboard entry points

pub mod auth;
pub mod health;
pub mod pages;
pub mod profile;
pub mod projects;
pub mod testimonials;
pub mod upload;
pub mod users;
