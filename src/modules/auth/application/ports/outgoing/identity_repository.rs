use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::{Identity, Role, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityRepositoryError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Identity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn create(&self, data: NewIdentity) -> Result<Identity, IdentityRepositoryError>;

    async fn update_profile(
        &self,
        id: UserId,
        changes: ProfileChanges,
    ) -> Result<Identity, IdentityRepositoryError>;

    async fn update_password(
        &self,
        id: UserId,
        password_hash: String,
    ) -> Result<(), IdentityRepositoryError>;

    /// Persists the suspended / suspended_by / suspended_at triple.
    async fn save_account_state(
        &self,
        identity: &Identity,
    ) -> Result<Identity, IdentityRepositoryError>;

    /// Hard delete; owned listings, saved deals and white-label profile cascade.
    async fn delete(&self, id: UserId) -> Result<(), IdentityRepositoryError>;
}
