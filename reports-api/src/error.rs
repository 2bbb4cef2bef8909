//! Error plumbing between the report store and the HTTP layer
//!
//! The store reports failures as `BoxError`; the query service wraps them in
//! [`ServiceError::Store`]. Converting to [`AppError`] is the single place a
//! store failure is logged, with its cause, before the client receives the
//! generic 500 body.

use shared::error::AppError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ServiceError {
    /// Report store failure (connection, SQL, transaction)
    Store(BoxError),
    /// Outcome the client sees as-is, e.g. an unknown report id
    App(AppError),
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(cause) => {
                tracing::error!(error = %cause, "Report store error");
                AppError::internal()
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
