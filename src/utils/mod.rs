//! Shared utilities
//!
//! Error handling, request extractors, validation and partial-update helpers.

pub mod errors;
pub mod extract;
pub mod patch;
pub mod validation;
