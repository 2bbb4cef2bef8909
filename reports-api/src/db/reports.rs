//! Report queries
//!
//! Reports are always read joined with their project and submitting user;
//! both foreign keys are NOT NULL so the joins are inner.

use chrono::{DateTime, Utc};
use shared::models::{
    PopulatedReport, ProjectRef, ReportDetail, ReportStatus, ReportType, Severity, UserRef,
};
use sqlx::PgPool;

use super::predicate::{REPORTS_FROM, ReportPredicate, order_by_clause};
use crate::error::BoxError;
use crate::filter::ReportFilters;

/// Flat listing row: report scalars plus the joined project and user columns
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ReportListRow {
    pub id: i64,
    pub status: ReportStatus,
    pub severity: Severity,
    pub report_type: ReportType,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub project_id: i64,
    pub project_name: String,
    pub user_id: i64,
    pub user_email: String,
    pub user_username: String,
}

impl From<ReportListRow> for PopulatedReport {
    fn from(row: ReportListRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            severity: row.severity,
            report_type: row.report_type,
            title: row.title,
            created_at: row.created_at,
            project: ProjectRef {
                id: row.project_id,
                name: row.project_name,
            },
            user: UserRef {
                id: row.user_id,
                email: row.user_email,
                username: row.user_username,
            },
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct ReportDetailRow {
    id: i64,
    status: ReportStatus,
    severity: Severity,
    report_type: ReportType,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    project_id: i64,
    user_id: i64,
    project_name: String,
    user_email: String,
    user_username: String,
}

impl From<ReportDetailRow> for ReportDetail {
    fn from(row: ReportDetailRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            severity: row.severity,
            report_type: row.report_type,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            project_id: row.project_id,
            user_id: row.user_id,
            project: ProjectRef {
                id: row.project_id,
                name: row.project_name,
            },
            user: UserRef {
                id: row.user_id,
                email: row.user_email,
                username: row.user_username,
            },
        }
    }
}

/// One page of matching rows plus the total number of matches
#[derive(Debug, Clone, Default)]
pub struct ReportPage {
    pub found: u64,
    pub rows: Vec<ReportListRow>,
}

const LIST_COLUMNS: &str = "r.id, r.status, r.severity, r.\"type\" AS report_type, r.title, \
     r.created_at, p.id AS project_id, p.name AS project_name, \
     u.id AS user_id, u.email AS user_email, u.username AS user_username";

/// Count every report, ignoring filters
pub async fn count_all(pool: &PgPool) -> Result<u64, BoxError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
        .fetch_one(pool)
        .await?;
    Ok(u64::try_from(count).unwrap_or_default())
}

/// Single report with description, project and user
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ReportDetail>, BoxError> {
    let sql = format!(
        "SELECT r.id, r.status, r.severity, r.\"type\" AS report_type, r.title, r.description, \
         r.created_at, r.project_id, r.user_id, p.name AS project_name, \
         u.email AS user_email, u.username AS user_username \
         {REPORTS_FROM} WHERE r.id = $1"
    );
    let row: Option<ReportDetailRow> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(ReportDetail::from))
}

/// Count and fetch one page under the same predicate, in one read-only
/// snapshot so that no concurrent write can separate the two.
pub async fn find_page(pool: &PgPool, filters: &ReportFilters) -> Result<ReportPage, BoxError> {
    let predicate = ReportPredicate::from_filters(filters);
    let where_clause = predicate.build_where_clause();
    let next = predicate.binding_count();

    let count_sql = format!("SELECT COUNT(*) {REPORTS_FROM}{where_clause}");
    let page_sql = format!(
        "SELECT {LIST_COLUMNS} {REPORTS_FROM}{where_clause}{order_by} LIMIT ${limit} OFFSET ${offset}",
        order_by = order_by_clause(filters.field, filters.sort),
        limit = next + 1,
        offset = next + 2,
    );

    let limit = i64::from(filters.page_size);
    let offset = i64::try_from(filters.skip()).unwrap_or(i64::MAX);

    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    let found: i64 = predicate
        .apply_bindings_scalar(sqlx::query_scalar(&count_sql))
        .fetch_one(&mut *tx)
        .await?;

    let rows: Vec<ReportListRow> = predicate
        .apply_bindings(sqlx::query_as(&page_sql))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(ReportPage {
        found: u64::try_from(found).unwrap_or_default(),
        rows,
    })
}
