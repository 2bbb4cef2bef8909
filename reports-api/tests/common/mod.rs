//! In-memory report store and request helpers shared by the API tests

#![allow(dead_code)]

use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use reports_api::db::{ReportListRow, ReportPage, ReportRepository};
use reports_api::error::BoxError;
use reports_api::filter::{ReportFilters, SortDirection, SortField};
use reports_api::{AppState, create_router};
use shared::models::{ProjectRef, ReportDetail, ReportStatus, ReportType, Severity, UserRef};
use tower::ServiceExt;

pub const API_KEY: &str = "test-api-key";

/// Stored report with its joined project and user
#[derive(Debug, Clone)]
pub struct StoredReport {
    pub row: ReportListRow,
    pub description: String,
}

/// Report store that evaluates filters in memory and records how often it
/// was queried
#[derive(Default)]
pub struct InMemoryReports {
    reports: Vec<StoredReport>,
    fail: bool,
    queries: AtomicUsize,
}

impl InMemoryReports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a storage error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_report(mut self, report: StoredReport) -> Self {
        self.reports.push(report);
        self
    }

    pub fn with_reports(mut self, reports: impl IntoIterator<Item = StoredReport>) -> Self {
        self.reports.extend(reports);
        self
    }

    /// Number of repository calls made so far
    pub fn queries(&self) -> usize {
        self.queries.load(AtomicOrdering::SeqCst)
    }

    fn begin(&self) -> Result<(), BoxError> {
        self.queries.fetch_add(1, AtomicOrdering::SeqCst);
        if self.fail {
            return Err("connection refused".into());
        }
        Ok(())
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(row: &ReportListRow, filters: &ReportFilters) -> bool {
    filters.report_id.is_none_or(|id| row.id == id)
        && filters
            .project
            .as_deref()
            .is_none_or(|p| contains_ci(&row.project_name, p))
        && filters
            .hacker
            .as_deref()
            .is_none_or(|h| contains_ci(&row.user_username, h) || contains_ci(&row.user_email, h))
        && filters.status.is_none_or(|s| row.status == s)
        && filters.severity.is_none_or(|s| row.severity == s)
        && filters.report_type.is_none_or(|t| row.report_type == t)
}

fn rank<T: PartialEq>(all: &[T], value: &T) -> usize {
    all.iter().position(|v| v == value).unwrap_or(usize::MAX)
}

fn compare(a: &ReportListRow, b: &ReportListRow, field: SortField) -> Ordering {
    let by_key = match field {
        SortField::Id => Ordering::Equal,
        SortField::Status => rank(ReportStatus::ALL, &a.status).cmp(&rank(ReportStatus::ALL, &b.status)),
        SortField::Severity => rank(Severity::ALL, &a.severity).cmp(&rank(Severity::ALL, &b.severity)),
        SortField::Type => {
            rank(ReportType::ALL, &a.report_type).cmp(&rank(ReportType::ALL, &b.report_type))
        }
        SortField::Title => a.title.cmp(&b.title),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::User => a.user_username.cmp(&b.user_username),
        SortField::Project => a.project_name.cmp(&b.project_name),
    };
    by_key.then(a.id.cmp(&b.id))
}

#[async_trait]
impl ReportRepository for InMemoryReports {
    async fn count_all(&self) -> Result<u64, BoxError> {
        self.begin()?;
        Ok(self.reports.len() as u64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ReportDetail>, BoxError> {
        self.begin()?;
        Ok(self.reports.iter().find(|r| r.row.id == id).map(|r| {
            let row = r.row.clone();
            ReportDetail {
                id: row.id,
                status: row.status,
                severity: row.severity,
                report_type: row.report_type,
                title: row.title,
                description: r.description.clone(),
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
        }))
    }

    async fn find_page(&self, filters: &ReportFilters) -> Result<ReportPage, BoxError> {
        self.begin()?;

        let mut rows: Vec<ReportListRow> = self
            .reports
            .iter()
            .map(|r| r.row.clone())
            .filter(|row| matches(row, filters))
            .collect();

        rows.sort_by(|a, b| {
            let ord = compare(a, b, filters.field);
            match filters.sort {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let found = rows.len() as u64;
        let rows = rows
            .into_iter()
            .skip(usize::try_from(filters.skip()).unwrap_or(usize::MAX))
            .take(filters.page_size as usize)
            .collect();

        Ok(ReportPage { found, rows })
    }
}

/// Builder for seeded reports
pub struct ReportSeed {
    row: ReportListRow,
    description: String,
}

impl ReportSeed {
    pub fn new(id: i64) -> Self {
        Self {
            row: ReportListRow {
                id,
                status: ReportStatus::Reported,
                severity: Severity::Medium,
                report_type: ReportType::SmartContract,
                title: format!("Report {id}"),
                created_at: base_time() + Duration::minutes(id),
                project_id: 1,
                project_name: "Acme Protocol".into(),
                user_id: 1,
                user_email: "alice@example.com".into(),
                user_username: "alice".into(),
            },
            description: format!("Details of report {id}"),
        }
    }

    pub fn status(mut self, status: ReportStatus) -> Self {
        self.row.status = status;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.row.severity = severity;
        self
    }

    pub fn report_type(mut self, report_type: ReportType) -> Self {
        self.row.report_type = report_type;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.row.title = title.into();
        self
    }

    pub fn project(mut self, id: i64, name: &str) -> Self {
        self.row.project_id = id;
        self.row.project_name = name.into();
        self
    }

    pub fn user(mut self, id: i64, username: &str, email: &str) -> Self {
        self.row.user_id = id;
        self.row.user_username = username.into();
        self.row.user_email = email.into();
        self
    }

    pub fn build(self) -> StoredReport {
        StoredReport {
            row: self.row,
            description: self.description,
        }
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn app(repo: Arc<InMemoryReports>) -> Router {
    create_router(AppState::new(repo, API_KEY))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, API_KEY)
        .body(Body::empty())
        .expect("request")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("infallible router")
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
