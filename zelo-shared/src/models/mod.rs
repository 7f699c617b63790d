//! Database models.
//!
//! - `user`: accounts with roles and password hashes
//! - `project`: portfolio projects with derived slugs
//! - `testimonial`: client testimonials

pub mod project;
pub mod testimonial;
pub mod user;
