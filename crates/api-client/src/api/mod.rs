//! Endpoint methods on [`crate::ApiClient`], one module per portal.

pub mod admin;
pub mod analyst;
pub mod auth;
pub mod courses;
pub mod instructors;
pub mod students;
