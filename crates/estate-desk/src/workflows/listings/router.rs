use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CatalogFilter, ListingDraft, ListingId, ModerationVerdict, Role};
use super::export::catalog_csv;
use super::repository::{ListingRepository, RepositoryError};
use super::service::{ListingService, ListingServiceError};

/// Router builder exposing the agent, moderation, and catalog endpoints.
pub fn listing_router<R>(service: Arc<ListingService<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route("/api/v1/listings", post(submit_handler::<R>))
        .route(
            "/api/v1/listings/:listing_id/moderation",
            post(moderation_handler::<R>),
        )
        .route(
            "/api/v1/listings/:listing_id/resubmission",
            post(resubmission_handler::<R>),
        )
        .route(
            "/api/v1/agents/:agent_id/listings",
            get(agent_listings_handler::<R>),
        )
        .route(
            "/api/v1/moderation/queue",
            get(moderation_queue_handler::<R>),
        )
        .route("/api/v1/catalog", get(catalog_handler::<R>))
        .route(
            "/api/v1/catalog/export.csv",
            get(catalog_export_handler::<R>),
        )
        .with_state(service)
}

/// Submission payload: the draft plus the session-resolved agent identity.
#[derive(Debug, Deserialize)]
pub struct SubmitListingRequest {
    pub agent_id: String,
    pub listing: ListingDraft,
}

/// Moderation payload. The role is asserted by the caller; resolving codes
/// to roles is the session collaborator's job.
#[derive(Debug, Deserialize)]
pub struct ModerationRequest {
    pub verdict: ModerationVerdict,
    pub actor_role: Role,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    axum::Json(request): axum::Json<SubmitListingRequest>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.submit(request.listing, &request.agent_id) {
        Ok(listing) => (StatusCode::ACCEPTED, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn moderation_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(listing_id): Path<String>,
    axum::Json(request): axum::Json<ModerationRequest>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let id = ListingId(listing_id);
    match service.moderate(&id, request.verdict, request.actor_role) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn resubmission_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(listing_id): Path<String>,
    axum::Json(request): axum::Json<SubmitListingRequest>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let id = ListingId(listing_id);
    match service.resubmit(&id, request.listing, &request.agent_id) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn agent_listings_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(agent_id): Path<String>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.listings_for_agent(&agent_id) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn moderation_queue_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.moderation_queue() {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Query(filter): Query<CatalogFilter>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.catalog(&filter) {
        Ok(cards) => (StatusCode::OK, axum::Json(cards)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_export_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Query(filter): Query<CatalogFilter>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let cards = match service.catalog(&filter) {
        Ok(cards) => cards,
        Err(error) => return error_response(error),
    };

    match catalog_csv(&cards) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}

fn error_response(error: ListingServiceError) -> Response {
    let status = match &error {
        ListingServiceError::Draft(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ListingServiceError::ManagerRequired | ListingServiceError::NotOwner => {
            StatusCode::FORBIDDEN
        }
        ListingServiceError::NotAwaitingRevision(_) => StatusCode::CONFLICT,
        ListingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ListingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ListingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
