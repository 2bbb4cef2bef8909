//! reports-api: vulnerability disclosure reports dashboard backend
//!
//! Serves filtered, sorted and paginated report listings out of PostgreSQL
//! behind a shared API key.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod services;
pub mod state;

pub use api::create_router;
pub use config::Config;
pub use state::AppState;
