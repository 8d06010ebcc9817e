use async_trait::async_trait;

use crate::modules::access::{AccessError, Actor};
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::ports::outgoing::ListingQueryError;
use crate::modules::saved_deal::application::ports::outgoing::SavedDealStoreError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SavedDealError {
    #[error("Listing not found")]
    ListingNotFound,

    #[error("Deal is not in the saved list")]
    NotSaved,

    #[error("Deal already saved")]
    AlreadySaved,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ListingQueryError> for SavedDealError {
    fn from(e: ListingQueryError) -> Self {
        SavedDealError::Internal(e.to_string())
    }
}

impl From<SavedDealStoreError> for SavedDealError {
    fn from(e: SavedDealStoreError) -> Self {
        match e {
            SavedDealStoreError::AlreadySaved => SavedDealError::AlreadySaved,
            SavedDealStoreError::DatabaseError(msg) => SavedDealError::Internal(msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// State after the toggle.
    pub saved: bool,
}

#[async_trait]
pub trait ListSavedDealsUseCase: Send + Sync {
    /// Most recently saved first.
    async fn execute(&self, actor: Actor) -> Result<Vec<Listing>, SavedDealError>;
}

#[async_trait]
pub trait SaveDealUseCase: Send + Sync {
    async fn execute(&self, actor: Actor, listing: ListingId) -> Result<Listing, SavedDealError>;
}

#[async_trait]
pub trait RemoveSavedDealUseCase: Send + Sync {
    async fn execute(&self, actor: Actor, listing: ListingId) -> Result<(), SavedDealError>;
}

#[async_trait]
pub trait ToggleSavedDealUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        listing: ListingId,
    ) -> Result<ToggleOutcome, SavedDealError>;
}
