use async_trait::async_trait;

use crate::modules::access::{AccessError, Actor};
use crate::modules::analytics::application::ports::outgoing::EventStoreError;
use crate::modules::auth::application::ports::outgoing::IdentityQueryError;
use crate::modules::distribution::application::domain::dashboard::{DailyActivity, DashboardStats};
use crate::modules::distribution::application::domain::white_label::{
    WhiteLabel, WhiteLabelPatch,
};
use crate::modules::distribution::application::ports::outgoing::WhiteLabelStoreError;
use crate::modules::listing::application::domain::entities::Listing;
use crate::modules::listing::application::ports::outgoing::ListingQueryError;
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DistributionError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// Duplicate domain or subdomain.
    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ListingQueryError> for DistributionError {
    fn from(e: ListingQueryError) -> Self {
        DistributionError::Internal(e.to_string())
    }
}

impl From<EventStoreError> for DistributionError {
    fn from(e: EventStoreError) -> Self {
        DistributionError::Internal(e.to_string())
    }
}

impl From<IdentityQueryError> for DistributionError {
    fn from(e: IdentityQueryError) -> Self {
        DistributionError::Internal(e.to_string())
    }
}

impl From<WhiteLabelStoreError> for DistributionError {
    fn from(e: WhiteLabelStoreError) -> Self {
        match e {
            WhiteLabelStoreError::DomainTaken | WhiteLabelStoreError::SubdomainTaken => {
                DistributionError::Conflict(e.to_string())
            }
            other => DistributionError::Internal(other.to_string()),
        }
    }
}

#[async_trait]
pub trait DistributionDashboardUseCase: Send + Sync {
    async fn execute(&self, actor: Actor) -> Result<DashboardStats, DistributionError>;
}

#[async_trait]
pub trait DistributionListingsUseCase: Send + Sync {
    /// The caller's own listings, newest first.
    async fn execute(&self, actor: Actor) -> Result<Vec<Listing>, DistributionError>;
}

#[async_trait]
pub trait DistributionStatsUseCase: Send + Sync {
    /// Views and clicks per calendar day, oldest first, ending today.
    async fn execute(&self, actor: Actor) -> Result<Vec<DailyActivity>, DistributionError>;
}

#[async_trait]
pub trait GetWhiteLabelUseCase: Send + Sync {
    /// Creates the profile on first access.
    async fn execute(&self, actor: Actor) -> Result<WhiteLabel, DistributionError>;
}

#[async_trait]
pub trait UpdateWhiteLabelUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        patch: WhiteLabelPatch,
    ) -> Result<WhiteLabel, DistributionError>;
}
