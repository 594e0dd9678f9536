//! Project configuration
//!
//! Database and environment settings.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::*;
