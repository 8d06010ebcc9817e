use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::{Identity, UserId};

#[derive(Debug, Clone, thiserror::Error)]
pub enum IdentityQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt identity record: {0}")]
    CorruptRecord(String),
}

/// Identity plus its credential hash; only login and password checks see this.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub identity: Identity,
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub listings: u64,
    pub saved_deals: u64,
}

#[async_trait]
pub trait IdentityQuery: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, IdentityQueryError>;

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, IdentityQueryError>;

    async fn find_credentials_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<StoredCredentials>, IdentityQueryError>;

    /// Whether another account already uses `email`.
    async fn email_taken(
        &self,
        email: &str,
        except: Option<UserId>,
    ) -> Result<bool, IdentityQueryError>;

    async fn activity_counts(&self, id: UserId) -> Result<ActivityCounts, IdentityQueryError>;
}
