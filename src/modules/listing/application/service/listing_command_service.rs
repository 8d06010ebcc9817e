use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::access::{authorize, AccessError, Action, Actor, Resource};
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::domain::listing_draft::{ListingDraft, ListingPatch};
use crate::modules::listing::application::domain::listing_policy::ListingPolicy;
use crate::modules::listing::application::ports::incoming::use_cases::{
    CreateListingUseCase, DeleteListingUseCase, ListingError, MyListingsUseCase,
    UpdateListingUseCase,
};
use crate::modules::listing::application::ports::outgoing::{ListingQuery, ListingRepository};
use crate::shared::cache::{CacheNamespace, ResultCache};

/// Owner-side listing management. Every successful write sweeps the
/// listing-query and autocomplete caches.
pub struct ListingCommandService<Q, R>
where
    Q: ListingQuery,
    R: ListingRepository,
{
    listings: Arc<Q>,
    repository: Arc<R>,
    cache: ResultCache,
    policy: ListingPolicy,
}

impl<Q, R> ListingCommandService<Q, R>
where
    Q: ListingQuery,
    R: ListingRepository,
{
    pub fn new(
        listings: Arc<Q>,
        repository: Arc<R>,
        cache: ResultCache,
        policy: ListingPolicy,
    ) -> Self {
        Self {
            listings,
            repository,
            cache,
            policy,
        }
    }

    async fn load(&self, id: ListingId) -> Result<Listing, ListingError> {
        self.listings
            .find_by_id(id)
            .await?
            .ok_or(ListingError::NotFound)
    }
}

#[async_trait]
impl<Q, R> CreateListingUseCase for ListingCommandService<Q, R>
where
    Q: ListingQuery + Send + Sync,
    R: ListingRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, draft: ListingDraft) -> Result<Listing, ListingError> {
        authorize(&actor, Action::Create, &Resource::Listing { owner: None })?;
        let owner = actor.id().ok_or(AccessError::Forbidden)?;

        let new_listing = draft
            .validate(owner, self.policy.default_status)
            .map_err(ListingError::ValidationFailed)?;

        let created = self.repository.create(new_listing).await?;
        self.cache.invalidate(&CacheNamespace::LISTING_WRITES).await;

        tracing::info!(listing_id = %created.id, owner = %owner, "Listing created");
        Ok(created)
    }
}

#[async_trait]
impl<Q, R> UpdateListingUseCase for ListingCommandService<Q, R>
where
    Q: ListingQuery + Send + Sync,
    R: ListingRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        id: ListingId,
        patch: ListingPatch,
    ) -> Result<Listing, ListingError> {
        let current = self.load(id).await?;
        authorize(
            &actor,
            Action::Update,
            &Resource::Listing {
                owner: Some(current.owner_id()),
            },
        )?;

        let next = patch
            .apply_to(&current)
            .map_err(ListingError::ValidationFailed)?;

        let saved = self.repository.update(&next).await?;
        self.cache.invalidate(&CacheNamespace::LISTING_WRITES).await;

        tracing::info!(listing_id = %id, "Listing updated");
        Ok(saved)
    }
}

#[async_trait]
impl<Q, R> DeleteListingUseCase for ListingCommandService<Q, R>
where
    Q: ListingQuery + Send + Sync,
    R: ListingRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, id: ListingId) -> Result<(), ListingError> {
        let current = self.load(id).await?;
        authorize(
            &actor,
            Action::Delete,
            &Resource::Listing {
                owner: Some(current.owner_id()),
            },
        )?;

        self.repository.delete(id).await?;
        self.cache.invalidate(&CacheNamespace::LISTING_WRITES).await;

        tracing::info!(listing_id = %id, "Listing deleted");
        Ok(())
    }
}

#[async_trait]
impl<Q, R> MyListingsUseCase for ListingCommandService<Q, R>
where
    Q: ListingQuery + Send + Sync,
    R: ListingRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor) -> Result<Vec<Listing>, ListingError> {
        let owner = actor.id().ok_or(AccessError::Forbidden)?;
        // Only roles that can manage their own listings have any.
        authorize(
            &actor,
            Action::Update,
            &Resource::Listing { owner: Some(owner) },
        )?;

        Ok(self.listings.list_by_owner(owner).await?)
    }
}
