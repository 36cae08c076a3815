use crate::infra::{AppState, InMemoryListingRepository};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use estate_desk::workflows::chat::{chat_router, ChatLog};
use estate_desk::workflows::listings::{listing_router, ListingService};
use estate_desk::workflows::sessions::{session_router, AccessPolicy};

pub(crate) fn with_platform_routes(
    service: Arc<ListingService<InMemoryListingRepository>>,
    policy: Arc<AccessPolicy>,
    chat: Arc<ChatLog>,
) -> axum::Router {
    listing_router(service)
        .merge(session_router(policy))
        .merge(chat_router(chat))
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
