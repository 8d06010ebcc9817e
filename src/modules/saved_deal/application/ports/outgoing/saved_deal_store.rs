use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::listing::application::domain::entities::ListingId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SavedDealStoreError {
    #[error("Deal already saved")]
    AlreadySaved,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// The set of `(user, listing)` pairs. A pair exists at most once.
#[async_trait]
pub trait SavedDealStore: Send + Sync {
    /// Most recently saved first.
    async fn listing_ids(&self, owner: UserId) -> Result<Vec<ListingId>, SavedDealStoreError>;

    async fn contains(&self, owner: UserId, listing: ListingId)
        -> Result<bool, SavedDealStoreError>;

    /// `AlreadySaved` when the pair exists.
    async fn insert(
        &self,
        owner: UserId,
        listing: ListingId,
        at: DateTime<Utc>,
    ) -> Result<(), SavedDealStoreError>;

    /// Whether a pair was removed.
    async fn remove(&self, owner: UserId, listing: ListingId)
        -> Result<bool, SavedDealStoreError>;
}
