//! Database access layer

pub mod predicate;
pub mod reports;

use async_trait::async_trait;
use shared::models::ReportDetail;
use sqlx::PgPool;

use crate::error::BoxError;
use crate::filter::ReportFilters;

pub use reports::{ReportListRow, ReportPage};

/// Read access to the report store
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Number of reports, unfiltered
    async fn count_all(&self) -> Result<u64, BoxError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ReportDetail>, BoxError>;

    /// Matching count and the requested page, both under the same filters
    async fn find_page(&self, filters: &ReportFilters) -> Result<ReportPage, BoxError>;
}

#[async_trait]
impl ReportRepository for PgPool {
    async fn count_all(&self) -> Result<u64, BoxError> {
        reports::count_all(self).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ReportDetail>, BoxError> {
        reports::find_by_id(self, id).await
    }

    async fn find_page(&self, filters: &ReportFilters) -> Result<ReportPage, BoxError> {
        reports::find_page(self, filters).await
    }
}
