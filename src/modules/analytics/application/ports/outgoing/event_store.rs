use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::modules::analytics::application::domain::events::{EventFilter, EventKind, TimeWindow};
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::listing::application::domain::entities::ListingId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Append-only event log. Events are never updated or deleted one by one;
/// they go away with their listing.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn record(
        &self,
        listing: ListingId,
        kind: EventKind,
        at: DateTime<Utc>,
    ) -> Result<(), EventStoreError>;

    /// `window: None` counts all time.
    async fn count(
        &self,
        listing: ListingId,
        filter: EventFilter,
        window: Option<TimeWindow>,
    ) -> Result<u64, EventStoreError>;

    /// Same, across every listing `owner` owns.
    async fn count_for_owner(
        &self,
        owner: UserId,
        filter: EventFilter,
        window: Option<TimeWindow>,
    ) -> Result<u64, EventStoreError>;
}
