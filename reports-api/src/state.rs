//! Application state for reports-api

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::db::ReportRepository;
use crate::error::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Report store (PostgreSQL pool in production)
    pub reports: Arc<dyn ReportRepository>,
    /// Shared secret expected in the `Authorization` header
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(reports: Arc<dyn ReportRepository>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            reports,
            api_key: api_key.into(),
        }
    }

    /// Connect to PostgreSQL, apply migrations and build the state
    pub async fn connect(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::new(Arc::new(pool), config.api_key.as_str()))
    }
}
