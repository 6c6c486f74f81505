//! Middleware module
//!
//! Request-level concerns: authentication and authorization extractors.

pub mod auth;

pub use auth::{AuthUser, AdminUser, Claims, verify_token};
