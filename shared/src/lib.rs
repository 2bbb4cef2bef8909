//! Shared types for the reports dashboard
//!
//! Error types and report models used by the API service and its
//! consumers.

pub mod error;
pub mod models;
