//! Listing intake, moderation workflow, and catalog queries.
//!
//! One service owns the collection; agents and managers never hold mutable
//! listing state. Agents submit drafts, managers hand down verdicts, and the
//! public catalog only ever sees approved listings.

pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CatalogFilter, DraftRejection, Listing, ListingDraft, ListingId, ListingStatus,
    ModerationVerdict, Role, PHOTO_LIMIT,
};
pub use export::{catalog_csv, ExportError};
pub use repository::{CatalogCard, ListingRepository, RepositoryError};
pub use router::{listing_router, ModerationRequest, SubmitListingRequest};
pub use service::{ListingService, ListingServiceError};
