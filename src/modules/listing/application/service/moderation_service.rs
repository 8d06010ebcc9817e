use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::modules::access::{authorize, AccessError, Action, Actor, Resource};
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::ports::incoming::use_cases::{
    ListingError, ModerateListingUseCase, ModerationCommand,
};
use crate::modules::listing::application::ports::outgoing::{ListingQuery, ListingRepository};
use crate::shared::cache::{CacheNamespace, ResultCache};

pub struct ModerationService<Q, R>
where
    Q: ListingQuery,
    R: ListingRepository,
{
    listings: Arc<Q>,
    repository: Arc<R>,
    cache: ResultCache,
}

impl<Q, R> ModerationService<Q, R>
where
    Q: ListingQuery,
    R: ListingRepository,
{
    pub fn new(listings: Arc<Q>, repository: Arc<R>, cache: ResultCache) -> Self {
        Self {
            listings,
            repository,
            cache,
        }
    }
}

#[async_trait]
impl<Q, R> ModerateListingUseCase for ModerationService<Q, R>
where
    Q: ListingQuery + Send + Sync,
    R: ListingRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        id: ListingId,
        command: ModerationCommand,
    ) -> Result<Listing, ListingError> {
        // Ownership plays no part in moderation.
        authorize(&actor, Action::Moderate, &Resource::Listing { owner: None })?;

        let mut listing = self
            .listings
            .find_by_id(id)
            .await?
            .ok_or(ListingError::NotFound)?;

        match command {
            ModerationCommand::Approve => {
                let admin = actor.id().ok_or(AccessError::Forbidden)?;
                listing.moderation.approve(admin, Utc::now());
            }
            ModerationCommand::Reject => listing.moderation.reject(),
            ModerationCommand::ToggleFeatured => listing.toggle_featured(),
        }

        let saved = self.repository.update(&listing).await?;
        self.cache.invalidate(&CacheNamespace::LISTING_WRITES).await;

        tracing::info!(
            listing_id = %id,
            command = ?command,
            status = %saved.moderation.status,
            featured = saved.featured,
            "Listing moderated"
        );
        Ok(saved)
    }
}
