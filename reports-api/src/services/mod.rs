//! Application services

pub mod reports;
