use async_trait::async_trait;

use crate::modules::access::{AccessError, Actor};
use crate::modules::admin::application::domain::overview::{
    AccountCommand, ListingAdminFilter, ManagedUser, PlatformStats, UserFilter,
};
use crate::modules::admin::application::ports::outgoing::AdminQueryError;
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::auth::application::ports::outgoing::{
    IdentityQueryError, IdentityRepositoryError,
};
use crate::modules::listing::application::domain::entities::Listing;
use crate::modules::listing::application::ports::outgoing::ListingQueryError;
use crate::shared::pagination::{Page, PageRequest};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdminError {
    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AdminQueryError> for AdminError {
    fn from(e: AdminQueryError) -> Self {
        AdminError::Internal(e.to_string())
    }
}

impl From<ListingQueryError> for AdminError {
    fn from(e: ListingQueryError) -> Self {
        AdminError::Internal(e.to_string())
    }
}

impl From<IdentityQueryError> for AdminError {
    fn from(e: IdentityQueryError) -> Self {
        AdminError::Internal(e.to_string())
    }
}

impl From<IdentityRepositoryError> for AdminError {
    fn from(e: IdentityRepositoryError) -> Self {
        match e {
            IdentityRepositoryError::NotFound => AdminError::UserNotFound,
            other => AdminError::Internal(other.to_string()),
        }
    }
}

#[async_trait]
pub trait PlatformStatsUseCase: Send + Sync {
    async fn execute(&self, actor: Actor) -> Result<PlatformStats, AdminError>;
}

#[async_trait]
pub trait AdminUsersUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Page<ManagedUser>, AdminError>;
}

#[async_trait]
pub trait AdminListingsUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        filter: ListingAdminFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, AdminError>;
}

#[async_trait]
pub trait PendingApprovalsUseCase: Send + Sync {
    async fn execute(&self, actor: Actor) -> Result<Vec<Listing>, AdminError>;
}

#[async_trait]
pub trait SetAccountStateUseCase: Send + Sync {
    /// Suspending yourself fails with `ForbiddenSelfAction`.
    async fn execute(
        &self,
        actor: Actor,
        target: UserId,
        command: AccountCommand,
    ) -> Result<ManagedUser, AdminError>;
}

#[async_trait]
pub trait DeleteUserUseCase: Send + Sync {
    /// Deleting yourself fails with `ForbiddenSelfAction`.
    async fn execute(&self, actor: Actor, target: UserId) -> Result<(), AdminError>;
}
