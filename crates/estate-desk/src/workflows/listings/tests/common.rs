use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::listings::domain::{Listing, ListingDraft, ListingId, ListingStatus};
use crate::workflows::listings::repository::{ListingRepository, RepositoryError};
use crate::workflows::listings::router::listing_router;
use crate::workflows::listings::service::ListingService;

pub(super) fn villa_draft() -> ListingDraft {
    ListingDraft {
        title: "Seaside villa with panoramic views".to_string(),
        price: "2 500 000 €".to_string(),
        description: "Modern villa with a private pool and garden.".to_string(),
        location_url: Some("https://maps.example.com/villa-paphos".to_string()),
        city: "Paphos".to_string(),
        district: "Coral Bay".to_string(),
        rooms: "4".to_string(),
        view: "sea".to_string(),
        property_type: "villa".to_string(),
        pool: "private".to_string(),
        photos: vec!["photos/villa-front.jpg".to_string()],
    }
}

pub(super) fn apartment_draft() -> ListingDraft {
    ListingDraft {
        title: "Two-room apartment near the marina".to_string(),
        price: "340 000 €".to_string(),
        description: "Walking distance to the seafront.".to_string(),
        location_url: None,
        city: "Limassol".to_string(),
        district: "Marina".to_string(),
        rooms: "2".to_string(),
        view: "city".to_string(),
        property_type: "apartment".to_string(),
        pool: "shared".to_string(),
        photos: Vec::new(),
    }
}

pub(super) fn build_service() -> (ListingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ListingService::new(repository.clone());
    (service, repository)
}

pub(super) fn listing_router_with_service(
    service: ListingService<MemoryRepository>,
) -> axum::Router {
    listing_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    listings: Arc<Mutex<Vec<Listing>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.listings.lock().expect("repository mutex poisoned").len()
    }
}

impl ListingRepository for MemoryRepository {
    fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError> {
        let mut guard = self.listings.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == listing.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: Listing) -> Result<(), RepositoryError> {
        let mut guard = self.listings.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == listing.id) {
            Some(slot) => {
                *slot = listing;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        let guard = self.listings.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|listing| &listing.id == id).cloned())
    }

    fn by_agent(&self, agent_id: &str) -> Result<Vec<Listing>, RepositoryError> {
        let guard = self.listings.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|listing| listing.agent_id == agent_id)
            .cloned()
            .collect())
    }

    fn with_status(&self, status: ListingStatus) -> Result<Vec<Listing>, RepositoryError> {
        let guard = self.listings.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|listing| listing.status == status)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl ListingRepository for UnavailableRepository {
    fn insert(&self, _listing: Listing) -> Result<Listing, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _listing: Listing) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn by_agent(&self, _agent_id: &str) -> Result<Vec<Listing>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn with_status(&self, _status: ListingStatus) -> Result<Vec<Listing>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
