use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::modules::access::{authorize, AccessError, Action, Actor, Resource};
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::ports::outgoing::ListingQuery;
use crate::modules::saved_deal::application::ports::incoming::use_cases::{
    ListSavedDealsUseCase, RemoveSavedDealUseCase, SaveDealUseCase, SavedDealError,
    ToggleOutcome, ToggleSavedDealUseCase,
};
use crate::modules::saved_deal::application::ports::outgoing::{
    SavedDealStore, SavedDealStoreError,
};

pub struct SavedDealService<Q, S>
where
    Q: ListingQuery,
    S: SavedDealStore,
{
    listings: Arc<Q>,
    store: Arc<S>,
}

impl<Q, S> SavedDealService<Q, S>
where
    Q: ListingQuery,
    S: SavedDealStore,
{
    pub fn new(listings: Arc<Q>, store: Arc<S>) -> Self {
        Self { listings, store }
    }

    /// The caller's own collection, checked for `action`.
    fn owner(actor: &Actor, action: Action) -> Result<UserId, SavedDealError> {
        let owner = actor.id().ok_or(AccessError::Forbidden)?;
        authorize(actor, action, &Resource::SavedMark { owner })?;
        Ok(owner)
    }

    async fn existing_listing(&self, id: ListingId) -> Result<Listing, SavedDealError> {
        self.listings
            .find_by_id(id)
            .await?
            .ok_or(SavedDealError::ListingNotFound)
    }
}

#[async_trait]
impl<Q, S> ListSavedDealsUseCase for SavedDealService<Q, S>
where
    Q: ListingQuery + Send + Sync,
    S: SavedDealStore + Send + Sync,
{
    async fn execute(&self, actor: Actor) -> Result<Vec<Listing>, SavedDealError> {
        let owner = Self::owner(&actor, Action::Read)?;
        let ids = self.store.listing_ids(owner).await?;
        Ok(self.listings.find_many(&ids).await?)
    }
}

#[async_trait]
impl<Q, S> SaveDealUseCase for SavedDealService<Q, S>
where
    Q: ListingQuery + Send + Sync,
    S: SavedDealStore + Send + Sync,
{
    async fn execute(&self, actor: Actor, id: ListingId) -> Result<Listing, SavedDealError> {
        let owner = Self::owner(&actor, Action::Create)?;
        let listing = self.existing_listing(id).await?;

        self.store.insert(owner, id, Utc::now()).await?;

        tracing::info!(user_id = %owner, listing_id = %id, "deal saved");
        Ok(listing)
    }
}

#[async_trait]
impl<Q, S> RemoveSavedDealUseCase for SavedDealService<Q, S>
where
    Q: ListingQuery + Send + Sync,
    S: SavedDealStore + Send + Sync,
{
    async fn execute(&self, actor: Actor, id: ListingId) -> Result<(), SavedDealError> {
        let owner = Self::owner(&actor, Action::Delete)?;

        if !self.store.remove(owner, id).await? {
            return Err(SavedDealError::NotSaved);
        }

        tracing::info!(user_id = %owner, listing_id = %id, "saved deal removed");
        Ok(())
    }
}

#[async_trait]
impl<Q, S> ToggleSavedDealUseCase for SavedDealService<Q, S>
where
    Q: ListingQuery + Send + Sync,
    S: SavedDealStore + Send + Sync,
{
    async fn execute(&self, actor: Actor, id: ListingId) -> Result<ToggleOutcome, SavedDealError> {
        let owner = Self::owner(&actor, Action::Update)?;
        self.existing_listing(id).await?;

        if self.store.contains(owner, id).await? {
            self.store.remove(owner, id).await?;
            return Ok(ToggleOutcome { saved: false });
        }

        match self.store.insert(owner, id, Utc::now()).await {
            // A concurrent save landed first; the end state is the same.
            Ok(()) | Err(SavedDealStoreError::AlreadySaved) => Ok(ToggleOutcome { saved: true }),
            Err(e) => Err(e.into()),
        }
    }
}
