//! Report data models
//!
//! Read-only views of the report store. Every report belongs to exactly one
//! project and one user.

pub mod pagination;
pub mod project;
pub mod report;
pub mod timestamp;
pub mod user;

pub use pagination::{Meta, ReportsResponse, TotalReportsResponse};
pub use project::ProjectRef;
pub use report::{PopulatedReport, ReportDetail, ReportStatus, ReportType, Severity, UnknownVariant};
pub use user::UserRef;
