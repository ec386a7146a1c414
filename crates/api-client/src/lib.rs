//! Typed async client for the Quintet REST API.
//!
//! Every endpoint is a method on [`ApiClient`], grouped by portal under
//! [`api`]. Failures come back as [`shared_types::AppError`].

pub mod api;
pub mod config;
pub mod error_convert;
pub mod http;

pub use http::{ApiClient, TokenSource};
