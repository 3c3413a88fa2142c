//! HTTP API server for the job board.
//!
//! Public listing and application endpoints, plus a password-gated admin
//! surface for managing listings.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;
