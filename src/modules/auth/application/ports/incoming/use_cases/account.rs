use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::auth::application::domain::entities::{Identity, Role, UserId};
use crate::modules::auth::application::ports::outgoing::{ActivityCounts, ProfileChanges};
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountError {
    #[error("Account not found")]
    NotFound,

    #[error("Password is incorrect")]
    IncorrectPassword,

    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error("Email has already been taken")]
    EmailTaken,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub businesses_count: u64,
    pub saved_deals_count: u64,
}

impl ProfileView {
    pub fn new(identity: Identity, counts: ActivityCounts) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            role: identity.role,
            created_at: identity.created_at,
            businesses_count: counts.listings,
            saved_deals_count: counts.saved_deals,
        }
    }
}

#[async_trait]
pub trait GetProfileUseCase: Send + Sync {
    async fn execute(&self, id: UserId) -> Result<ProfileView, AccountError>;
}

#[async_trait]
pub trait UpdateProfileUseCase: Send + Sync {
    async fn execute(&self, id: UserId, changes: ProfileChanges)
        -> Result<ProfileView, AccountError>;
}

#[async_trait]
pub trait ChangePasswordUseCase: Send + Sync {
    async fn execute(
        &self,
        id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError>;
}

#[async_trait]
pub trait DeleteAccountUseCase: Send + Sync {
    /// Requires the account password as confirmation.
    async fn execute(&self, id: UserId, password: &str) -> Result<(), AccountError>;
}
