use async_trait::async_trait;

use crate::modules::access::{AccessError, Actor};
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::domain::listing_draft::{ListingDraft, ListingPatch};
use crate::modules::listing::application::domain::search::{ListingSearch, Suggestion};
use crate::modules::listing::application::ports::outgoing::{
    ListingQueryError, ListingRepositoryError,
};
use crate::shared::pagination::Page;
use crate::shared::validation::ValidationErrors;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListingError {
    #[error("Listing not found")]
    NotFound,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ListingQueryError> for ListingError {
    fn from(e: ListingQueryError) -> Self {
        ListingError::Internal(e.to_string())
    }
}

impl From<ListingRepositoryError> for ListingError {
    fn from(e: ListingRepositoryError) -> Self {
        match e {
            ListingRepositoryError::NotFound => ListingError::NotFound,
            ListingRepositoryError::DatabaseError(msg) => ListingError::Internal(msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationCommand {
    Approve,
    Reject,
    ToggleFeatured,
}

//
// ──────────────────────────────────────────────────────────
// Read side
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait SearchListingsUseCase: Send + Sync {
    async fn execute(&self, search: ListingSearch) -> Result<Page<Listing>, ListingError>;
}

#[async_trait]
pub trait AutocompleteUseCase: Send + Sync {
    /// Queries under two characters answer `[]` without searching.
    async fn execute(&self, query: &str) -> Result<Vec<Suggestion>, ListingError>;
}

#[async_trait]
pub trait GetListingUseCase: Send + Sync {
    /// Also records a view event, best effort.
    async fn execute(&self, actor: Actor, id: ListingId) -> Result<Listing, ListingError>;
}

#[async_trait]
pub trait MyListingsUseCase: Send + Sync {
    async fn execute(&self, actor: Actor) -> Result<Vec<Listing>, ListingError>;
}

//
// ──────────────────────────────────────────────────────────
// Write side (every success sweeps the listing caches)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait CreateListingUseCase: Send + Sync {
    async fn execute(&self, actor: Actor, draft: ListingDraft) -> Result<Listing, ListingError>;
}

#[async_trait]
pub trait UpdateListingUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        id: ListingId,
        patch: ListingPatch,
    ) -> Result<Listing, ListingError>;
}

#[async_trait]
pub trait DeleteListingUseCase: Send + Sync {
    async fn execute(&self, actor: Actor, id: ListingId) -> Result<(), ListingError>;
}

#[async_trait]
pub trait ModerateListingUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        id: ListingId,
        command: ModerationCommand,
    ) -> Result<Listing, ListingError>;
}
