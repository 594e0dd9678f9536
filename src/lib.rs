//! Deal Machine - wholesale vehicle auction listings API
//!
//! Admin catalog of vehicles and sale events, a public storefront of live
//! listings, past sale results, and pass-throughs to VIN decoding, video
//! hosting and AI condition disclosures.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
