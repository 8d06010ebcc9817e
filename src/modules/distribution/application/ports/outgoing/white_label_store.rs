use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::distribution::application::domain::white_label::WhiteLabel;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WhiteLabelStoreError {
    /// The owner already has a profile.
    #[error("White label already exists")]
    AlreadyExists,

    #[error("Domain has already been taken")]
    DomainTaken,

    #[error("Subdomain has already been taken")]
    SubdomainTaken,

    #[error("White label not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait WhiteLabelStore: Send + Sync {
    async fn find_by_owner(&self, owner: UserId) -> Result<Option<WhiteLabel>, WhiteLabelStoreError>;

    async fn insert(&self, profile: &WhiteLabel) -> Result<WhiteLabel, WhiteLabelStoreError>;

    async fn update(&self, profile: &WhiteLabel) -> Result<WhiteLabel, WhiteLabelStoreError>;
}
