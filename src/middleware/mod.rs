//! Middleware
//!
//! Admin authentication and CORS.

pub mod auth;
pub mod cors;

pub use auth::require_admin;
pub use cors::cors_layer;
