use async_trait::async_trait;

use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::domain::listing_draft::NewListing;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingRepositoryError {
    #[error("Listing not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create(&self, listing: NewListing) -> Result<Listing, ListingRepositoryError>;

    /// Persists every mutable field, moderation state and `featured`
    /// included.
    async fn update(&self, listing: &Listing) -> Result<Listing, ListingRepositoryError>;

    /// Cascades to saved deals and analytics events.
    async fn delete(&self, id: ListingId) -> Result<(), ListingRepositoryError>;
}
