use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::domain::search::ListingSearch;
use crate::shared::pagination::Page;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListingQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt listing record: {0}")]
    CorruptRecord(String),
}

#[async_trait]
pub trait ListingQuery: Send + Sync {
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, ListingQueryError>;

    /// Missing ids are skipped; the result follows the order of `ids`.
    async fn find_many(&self, ids: &[ListingId]) -> Result<Vec<Listing>, ListingQueryError>;

    async fn search(&self, search: &ListingSearch) -> Result<Page<Listing>, ListingQueryError>;

    /// Newest first.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Listing>, ListingQueryError>;
}
