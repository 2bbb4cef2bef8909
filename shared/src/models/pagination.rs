//! Report list responses and pagination metadata

use serde::{Deserialize, Serialize};

use super::report::PopulatedReport;

/// Pagination metadata for a report listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Total number of reports matching the filters (not the page length)
    pub found_reports: u64,
    /// Effective page size used for the fetch
    pub page_size: u32,
    /// `ceil(found_reports / page_size)`
    pub total_pages: u64,
}

impl Meta {
    pub fn new(found_reports: u64, page_size: u32) -> Self {
        let total_pages = if page_size > 0 {
            found_reports.div_ceil(u64::from(page_size))
        } else {
            0
        };

        Self {
            found_reports,
            page_size,
            total_pages,
        }
    }
}

/// `GET /reports` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsResponse {
    pub reports: Vec<PopulatedReport>,
    pub meta: Meta,
}

/// `GET /reports/total` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalReportsResponse {
    pub total_reports: u64,
}
