use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use leggo::{authorship_router, highlights_router, AuthorshipService, HighlightService, LeggoStore};
use serde_json::json;
use std::sync::Arc;

/// Query endpoints plus health, readiness and metrics, all sharing one store.
pub(crate) fn with_query_routes<S>(store: Arc<S>) -> axum::Router
where
    S: LeggoStore + 'static,
{
    let authorship = Arc::new(AuthorshipService::new(store.clone()));
    let highlights = Arc::new(HighlightService::new(store));

    authorship_router(authorship)
        .merge(highlights_router(highlights))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
