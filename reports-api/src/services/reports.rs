//! Report query service
//!
//! Executes listing, lookup and total queries against a
//! [`ReportRepository`] and assembles the response shapes.

use shared::error::AppError;
use shared::models::{Meta, PopulatedReport, ReportDetail, ReportsResponse, TotalReportsResponse};

use crate::db::ReportRepository;
use crate::error::ServiceResult;
use crate::filter::ReportFilters;

/// Filtered, sorted, paginated report listing
pub async fn list_reports(
    repo: &dyn ReportRepository,
    filters: &ReportFilters,
) -> ServiceResult<ReportsResponse> {
    let page = repo.find_page(filters).await?;

    let reports: Vec<PopulatedReport> = page.rows.into_iter().map(PopulatedReport::from).collect();
    let meta = Meta::new(page.found, filters.page_size);

    tracing::debug!(
        found = meta.found_reports,
        returned = reports.len(),
        page = filters.page,
        page_size = filters.page_size,
        "Listed reports"
    );

    Ok(ReportsResponse { reports, meta })
}

/// Full report by id
pub async fn get_report(repo: &dyn ReportRepository, id: i64) -> ServiceResult<ReportDetail> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::report_not_found().into())
}

pub async fn total_reports(repo: &dyn ReportRepository) -> ServiceResult<TotalReportsResponse> {
    let total_reports = repo.count_all().await?;
    Ok(TotalReportsResponse { total_reports })
}
