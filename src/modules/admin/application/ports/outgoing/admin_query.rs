use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::modules::admin::application::domain::overview::{
    ListingAdminFilter, ManagedUser, PlatformStats, UserFilter,
};
use crate::modules::listing::application::domain::entities::ListingId;
use crate::shared::pagination::{Page, PageRequest};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

/// Platform-wide reads. Listings come back as ids, hydrated through the
/// listing query port.
#[async_trait]
pub trait AdminQuery: Send + Sync {
    /// `recent_*` counters include rows created at or after `since`.
    async fn platform_stats(&self, since: DateTime<Utc>) -> Result<PlatformStats, AdminQueryError>;

    async fn users(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<ManagedUser>, AdminQueryError>;

    async fn listing_ids(
        &self,
        filter: &ListingAdminFilter,
        page: PageRequest,
    ) -> Result<Page<ListingId>, AdminQueryError>;

    /// Every pending listing, newest first.
    async fn pending_listing_ids(&self) -> Result<Vec<ListingId>, AdminQueryError>;
}
