use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for listings in the shared collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Upper bound on photo references accepted per listing.
pub const PHOTO_LIMIT: usize = 15;

/// Moderation state tracked for every listing.
///
/// `Pending` is the sole creation state; the other three are reached only
/// through a manager verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
    Revision,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Approved => "approved",
            ListingStatus::Rejected => "rejected",
            ListingStatus::Revision => "revision",
        }
    }
}

/// Verdicts a manager may hand down. `Pending` is deliberately absent: a
/// listing can only re-enter the queue through resubmission, never through
/// moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationVerdict {
    Approved,
    Rejected,
    Revision,
}

impl ModerationVerdict {
    pub const fn status(self) -> ListingStatus {
        match self {
            ModerationVerdict::Approved => ListingStatus::Approved,
            ModerationVerdict::Rejected => ListingStatus::Rejected,
            ModerationVerdict::Revision => ListingStatus::Revision,
        }
    }
}

/// Actor role asserted by the caller. Credential handling lives with the
/// session collaborator; the workflow only distinguishes the two roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Agent,
    Manager,
}

/// Draft a submission form accumulates before validation.
///
/// Every field may be left blank while the form is being filled in. The
/// checks run exactly once, when the draft crosses the submission boundary;
/// a draft never becomes a [`Listing`] without passing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location_url: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub rooms: String,
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub pool: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl ListingDraft {
    /// Validate the draft and promote it into a listing awaiting moderation.
    pub fn submit_as(
        self,
        id: ListingId,
        agent_id: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Listing, DraftRejection> {
        if self.title.trim().is_empty() {
            return Err(DraftRejection::MissingTitle);
        }
        if self.price.trim().is_empty() {
            return Err(DraftRejection::MissingPrice);
        }
        if self.photos.len() > PHOTO_LIMIT {
            return Err(DraftRejection::TooManyPhotos {
                count: self.photos.len(),
                limit: PHOTO_LIMIT,
            });
        }

        Ok(Listing {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            location_url: self.location_url.filter(|url| !url.trim().is_empty()),
            city: self.city,
            district: self.district,
            rooms: self.rooms,
            view: self.view,
            property_type: self.property_type,
            pool: self.pool,
            photos: self.photos,
            agent_id: agent_id.to_string(),
            status: ListingStatus::Pending,
            submitted_at,
        })
    }
}

/// Rejected submission drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftRejection {
    #[error("listing title is required")]
    MissingTitle,
    #[error("listing price is required")]
    MissingPrice,
    #[error("at most {limit} photos are accepted per listing, got {count}")]
    TooManyPhotos { count: usize, limit: usize },
}

/// A real-estate listing together with its moderation state.
///
/// `id` and `agent_id` are set at creation and never change afterwards;
/// `status` changes only through moderation or resubmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub price: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_url: Option<String>,
    pub city: String,
    pub district: String,
    pub rooms: String,
    pub view: String,
    pub property_type: String,
    pub pool: String,
    pub photos: Vec<String>,
    pub agent_id: String,
    pub status: ListingStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Equality filter applied to the public catalog. A listing matches when it
/// matches every supplied field; blank values count as absent so the filter
/// form can submit empty selects as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogFilter {
    pub city: Option<String>,
    pub rooms: Option<String>,
    pub property_type: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        field_matches(&self.city, &listing.city)
            && field_matches(&self.rooms, &listing.rooms)
            && field_matches(&self.property_type, &listing.property_type)
    }
}

fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
    match wanted {
        Some(value) if !value.is_empty() => actual == value,
        _ => true,
    }
}
