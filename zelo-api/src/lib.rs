//! # Zelo API Server Library
//!
//! Backend for the Zelo marketing/portfolio site and its admin panel.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `response`: The uniform `{message, data, status}` envelope
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
