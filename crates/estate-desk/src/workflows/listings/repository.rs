use serde::Serialize;

use super::domain::{Listing, ListingId, ListingStatus};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations must hand back listings in insertion order from the list
/// queries (the portals use it as display order) and apply each call
/// atomically: a failed mutation leaves the collection untouched.
pub trait ListingRepository: Send + Sync {
    fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError>;
    fn update(&self, listing: Listing) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError>;
    fn by_agent(&self, agent_id: &str) -> Result<Vec<Listing>, RepositoryError>;
    fn with_status(&self, status: ListingStatus) -> Result<Vec<Listing>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("listing already exists")]
    Conflict,
    #[error("listing not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public catalog projection of an approved listing. The submitting agent
/// and the moderation state stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogCard {
    pub id: ListingId,
    pub title: String,
    pub price: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_url: Option<String>,
    pub city: String,
    pub district: String,
    pub rooms: String,
    pub view: String,
    pub property_type: String,
    pub pool: String,
    pub photos: Vec<String>,
}

impl CatalogCard {
    pub fn of(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price: listing.price.clone(),
            description: listing.description.clone(),
            location_url: listing.location_url.clone(),
            city: listing.city.clone(),
            district: listing.district.clone(),
            rooms: listing.rooms.clone(),
            view: listing.view.clone(),
            property_type: listing.property_type.clone(),
            pool: listing.pool.clone(),
            photos: listing.photos.clone(),
        }
    }
}
