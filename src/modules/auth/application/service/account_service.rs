use async_trait::async_trait;
use email_address::EmailAddress;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::auth::application::domain::password_rules::check_password;
use crate::modules::auth::application::ports::incoming::use_cases::{
    AccountError, ChangePasswordUseCase, DeleteAccountUseCase, GetProfileUseCase, ProfileView,
    UpdateProfileUseCase,
};
use crate::modules::auth::application::ports::outgoing::{
    IdentityQuery, IdentityQueryError, IdentityRepository, IdentityRepositoryError,
    PasswordHasher, ProfileChanges, StoredCredentials,
};
use crate::shared::cache::{CacheNamespace, ResultCache};
use crate::shared::validation::ValidationErrors;

/// Self-service account operations for the signed-in identity.
pub struct AccountService<Q, R>
where
    Q: IdentityQuery,
    R: IdentityRepository,
{
    identities: Q,
    repository: R,
    hasher: Arc<dyn PasswordHasher>,
    cache: ResultCache,
}

fn internal(e: impl std::fmt::Display) -> AccountError {
    AccountError::Internal(e.to_string())
}

impl From<IdentityQueryError> for AccountError {
    fn from(e: IdentityQueryError) -> Self {
        internal(e)
    }
}

impl From<IdentityRepositoryError> for AccountError {
    fn from(e: IdentityRepositoryError) -> Self {
        match e {
            IdentityRepositoryError::NotFound => AccountError::NotFound,
            IdentityRepositoryError::EmailAlreadyExists => AccountError::EmailTaken,
            IdentityRepositoryError::DatabaseError(msg) => AccountError::Internal(msg),
        }
    }
}

impl<Q, R> AccountService<Q, R>
where
    Q: IdentityQuery,
    R: IdentityRepository,
{
    pub fn new(identities: Q, repository: R, hasher: Arc<dyn PasswordHasher>, cache: ResultCache) -> Self {
        Self {
            identities,
            repository,
            hasher,
            cache,
        }
    }

    async fn profile(&self, id: UserId) -> Result<ProfileView, AccountError> {
        let identity = self
            .identities
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;
        let counts = self.identities.activity_counts(id).await?;
        Ok(ProfileView::new(identity, counts))
    }

    async fn confirmed_credentials(
        &self,
        id: UserId,
        password: &str,
    ) -> Result<StoredCredentials, AccountError> {
        let stored = self
            .identities
            .find_credentials_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;

        let matches = self
            .hasher
            .verify(password, &stored.password_hash)
            .await
            .map_err(internal)?;

        if matches {
            Ok(stored)
        } else {
            Err(AccountError::IncorrectPassword)
        }
    }

    fn normalise(changes: ProfileChanges) -> Result<ProfileChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = changes.name.map(|n| n.trim().to_string());
        if let Some(name) = &name {
            errors.check(name.is_empty(), "Name can't be blank");
        }

        let email = changes.email.map(|e| e.trim().to_lowercase());
        if let Some(email) = &email {
            errors.check(!EmailAddress::is_valid(email), "Email is invalid");
        }

        errors.into_result(ProfileChanges { name, email })
    }
}

#[async_trait]
impl<Q, R> GetProfileUseCase for AccountService<Q, R>
where
    Q: IdentityQuery + Send + Sync,
    R: IdentityRepository + Send + Sync,
{
    async fn execute(&self, id: UserId) -> Result<ProfileView, AccountError> {
        self.profile(id).await
    }
}

#[async_trait]
impl<Q, R> UpdateProfileUseCase for AccountService<Q, R>
where
    Q: IdentityQuery + Send + Sync,
    R: IdentityRepository + Send + Sync,
{
    async fn execute(&self, id: UserId, changes: ProfileChanges) -> Result<ProfileView, AccountError> {
        let changes = Self::normalise(changes).map_err(AccountError::ValidationFailed)?;

        if changes.is_empty() {
            return self.profile(id).await;
        }

        if let Some(email) = &changes.email {
            if self.identities.email_taken(email, Some(id)).await? {
                return Err(AccountError::EmailTaken);
            }
        }

        let renamed = changes.name.is_some();
        self.repository.update_profile(id, changes).await?;

        // Listing payloads embed the owner's display name.
        if renamed {
            self.cache.invalidate(&CacheNamespace::LISTING_WRITES).await;
        }

        self.profile(id).await
    }
}

#[async_trait]
impl<Q, R> ChangePasswordUseCase for AccountService<Q, R>
where
    Q: IdentityQuery + Send + Sync,
    R: IdentityRepository + Send + Sync,
{
    async fn execute(
        &self,
        id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        self.confirmed_credentials(id, current_password).await?;

        let mut errors = ValidationErrors::new();
        check_password(&mut errors, new_password);
        errors.into_result(()).map_err(AccountError::ValidationFailed)?;

        let hash = self.hasher.hash(new_password).await.map_err(internal)?;
        self.repository.update_password(id, hash).await?;

        tracing::info!("Identity {} changed password", id);
        Ok(())
    }
}

#[async_trait]
impl<Q, R> DeleteAccountUseCase for AccountService<Q, R>
where
    Q: IdentityQuery + Send + Sync,
    R: IdentityRepository + Send + Sync,
{
    async fn execute(&self, id: UserId, password: &str) -> Result<(), AccountError> {
        self.confirmed_credentials(id, password).await?;
        self.repository.delete(id).await?;

        // Owned listings went with the account.
        self.cache.invalidate(&CacheNamespace::LISTING_WRITES).await;

        tracing::info!("Identity {} deleted own account", id);
        Ok(())
    }
}
