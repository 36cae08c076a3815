use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use estate_desk::workflows::listings::{
    Listing, ListingId, ListingRepository, ListingStatus, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local listing store. A `Vec` keeps the collection in insertion
/// order, which the list queries pass through as display order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    listings: Arc<Mutex<Vec<Listing>>>,
}

impl ListingRepository for InMemoryListingRepository {
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
