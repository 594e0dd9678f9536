//! Database module
//!
//! Connection handling for PostgreSQL.

pub mod connection;

pub use connection::{connect, run_migrations};
