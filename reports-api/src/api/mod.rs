//! HTTP routes for reports-api

pub mod health;
pub mod reports;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, middleware};
use http::{HeaderName, HeaderValue, Method};
use shared::error::AppError;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::api_key_middleware;
use crate::state::AppState;

/// Handler result: JSON body or an `{"error": ..}` response
pub type ApiResult<T> = Result<Json<T>, AppError>;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build the application router with middleware and state
///
/// Every route is GET-only. Other methods (HEAD included) and unknown paths
/// answer 404 before any credential check; the API key is only verified on
/// matched report routes.
pub fn create_router(state: AppState) -> Router {
    let reports = Router::new()
        .route("/reports", get(reports::list_reports))
        .route("/reports/total", get(reports::total_reports))
        .route("/reports/{id}", get(reports::get_report))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ));

    // Last layer added is outermost: the request id is set before tracing
    // and before the propagate layer copies it onto the response.
    Router::new()
        .route("/health", get(health::health_check))
        .merge(reports)
        .fallback(not_found)
        .layer(middleware::from_fn(get_only))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}

/// `get` routes also answer HEAD; only GET is served here.
async fn get_only(request: Request, next: Next) -> Response {
    if request.method() != Method::GET {
        tracing::debug!(method = %request.method(), path = %request.uri().path(), "Method not allowed");
        return AppError::not_found().into_response();
    }
    next.run(request).await
}

async fn not_found(uri: http::Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route");
    AppError::not_found()
}
