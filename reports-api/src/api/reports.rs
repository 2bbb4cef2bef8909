//! Report endpoints
//!
//! - `GET /reports` filtered, sorted, paginated listing
//! - `GET /reports/total` unfiltered report count
//! - `GET /reports/{id}` single report with description

use std::collections::HashMap;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use shared::error::AppError;
use shared::models::{ReportDetail, ReportsResponse, TotalReportsResponse};

use super::ApiResult;
use crate::filter::ReportFilters;
use crate::services;
use crate::state::AppState;

/// GET /reports
///
/// Malformed or unknown parameters never fail the request; they fall back
/// to their defaults.
pub async fn list_reports(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<ReportsResponse> {
    let params = match query {
        Ok(Query(params)) => params,
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable query string, using defaults");
            HashMap::new()
        }
    };

    let filters = ReportFilters::from_params(&params);
    let response = services::reports::list_reports(state.reports.as_ref(), &filters).await?;
    Ok(Json(response))
}

/// GET /reports/total
pub async fn total_reports(State(state): State<AppState>) -> ApiResult<TotalReportsResponse> {
    let response = services::reports::total_reports(state.reports.as_ref()).await?;
    Ok(Json(response))
}

/// GET /reports/{id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ReportDetail> {
    let id: i64 = id.parse().map_err(|_| AppError::report_not_found())?;
    let report = services::reports::get_report(state.reports.as_ref(), id).await?;
    Ok(Json(report))
}
