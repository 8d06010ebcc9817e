use async_trait::async_trait;

use crate::modules::access::{AccessError, Actor};
use crate::modules::analytics::application::domain::events::AnalyticsSummary;
use crate::modules::analytics::application::ports::outgoing::EventStoreError;
use crate::modules::listing::application::domain::entities::ListingId;
use crate::modules::listing::application::ports::outgoing::ListingQueryError;
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Listing not found")]
    NotFound,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ListingQueryError> for AnalyticsError {
    fn from(e: ListingQueryError) -> Self {
        AnalyticsError::Internal(e.to_string())
    }
}

impl From<EventStoreError> for AnalyticsError {
    fn from(e: EventStoreError) -> Self {
        AnalyticsError::Internal(e.to_string())
    }
}

#[async_trait]
pub trait TrackClickUseCase: Send + Sync {
    /// `click_type` is `phone`, `email`, `website` or absent. Recording is
    /// best effort; only an unknown listing or click type fails.
    async fn execute(
        &self,
        actor: Actor,
        listing: ListingId,
        click_type: Option<String>,
    ) -> Result<(), AnalyticsError>;
}

#[async_trait]
pub trait ListingAnalyticsUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        listing: ListingId,
    ) -> Result<AnalyticsSummary, AnalyticsError>;
}
