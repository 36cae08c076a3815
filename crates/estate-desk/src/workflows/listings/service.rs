use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    CatalogFilter, DraftRejection, Listing, ListingDraft, ListingId, ListingStatus,
    ModerationVerdict, Role,
};
use super::repository::{CatalogCard, ListingRepository, RepositoryError};

/// Service owning the moderation workflow over the shared listing collection.
///
/// All mutations go through here; the portals hold no listing state of their
/// own and only see what the queries return.
pub struct ListingService<R> {
    repository: Arc<R>,
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ListingId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ListingId(format!("lst-{id:06}"))
}

impl<R> ListingService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new submission. It enters the queue as `Pending`;
    /// nothing is stored when validation fails.
    pub fn submit(
        &self,
        draft: ListingDraft,
        agent_id: &str,
    ) -> Result<Listing, ListingServiceError> {
        let listing = draft.submit_as(next_listing_id(), agent_id, Utc::now())?;
        let stored = self.repository.insert(listing)?;
        info!(listing_id = %stored.id.0, agent_id, "listing submitted");
        Ok(stored)
    }

    /// Apply a manager verdict. Only the status field changes; a repeated
    /// identical verdict is a no-op, and a later verdict may overturn an
    /// earlier one (no lock-out after a decision).
    pub fn moderate(
        &self,
        id: &ListingId,
        verdict: ModerationVerdict,
        actor_role: Role,
    ) -> Result<Listing, ListingServiceError> {
        if actor_role != Role::Manager {
            return Err(ListingServiceError::ManagerRequired);
        }

        let mut listing = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        listing.status = verdict.status();
        self.repository.update(listing.clone())?;
        info!(listing_id = %id.0, status = listing.status.label(), "listing moderated");
        Ok(listing)
    }

    /// Replace a revision-flagged listing with a corrected draft and return
    /// it to the moderation queue. The id, owner, and queue position are
    /// preserved; only the owning agent may resubmit, and only while the
    /// listing is in `Revision`.
    pub fn resubmit(
        &self,
        id: &ListingId,
        draft: ListingDraft,
        agent_id: &str,
    ) -> Result<Listing, ListingServiceError> {
        let existing = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        if existing.agent_id != agent_id {
            return Err(ListingServiceError::NotOwner);
        }
        if existing.status != ListingStatus::Revision {
            return Err(ListingServiceError::NotAwaitingRevision(existing.status));
        }

        let listing = draft.submit_as(existing.id.clone(), &existing.agent_id, Utc::now())?;
        self.repository.update(listing.clone())?;
        info!(listing_id = %id.0, agent_id, "listing resubmitted");
        Ok(listing)
    }

    /// Every submission by the agent, regardless of status, in submission
    /// order. Backs the agent portal's "my listings" view.
    pub fn listings_for_agent(&self, agent_id: &str) -> Result<Vec<Listing>, ListingServiceError> {
        Ok(self.repository.by_agent(agent_id)?)
    }

    /// The moderation queue: exactly the pending listings, in submission order.
    pub fn moderation_queue(&self) -> Result<Vec<Listing>, ListingServiceError> {
        Ok(self.repository.with_status(ListingStatus::Pending)?)
    }

    /// Approved listings narrowed by the filter, projected for public display.
    pub fn catalog(
        &self,
        filter: &CatalogFilter,
    ) -> Result<Vec<CatalogCard>, ListingServiceError> {
        let approved = self.repository.with_status(ListingStatus::Approved)?;
        Ok(approved
            .iter()
            .filter(|listing| filter.matches(listing))
            .map(CatalogCard::of)
            .collect())
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Draft(#[from] DraftRejection),
    #[error("manager role required to moderate listings")]
    ManagerRequired,
    #[error("only the submitting agent may resubmit this listing")]
    NotOwner,
    #[error("listing is not awaiting revision (status: {})", .0.label())]
    NotAwaitingRevision(ListingStatus),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
