//! Unified error system for the reports service
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Error type rendered to clients as [`ErrorBody`]
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Report errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ReportNotFound);
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.error, "Report not found");
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, ErrorBody};
