use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::access::{authorize, Action, Actor, Resource};
use crate::modules::analytics::application::domain::events::EventKind;
use crate::modules::analytics::application::helpers::AnalyticsRecorder;
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::ports::incoming::use_cases::{
    GetListingUseCase, ListingError,
};
use crate::modules::listing::application::ports::outgoing::ListingQuery;

pub struct GetListingService<Q>
where
    Q: ListingQuery,
{
    listings: Arc<Q>,
    recorder: AnalyticsRecorder,
}

impl<Q> GetListingService<Q>
where
    Q: ListingQuery,
{
    pub fn new(listings: Arc<Q>, recorder: AnalyticsRecorder) -> Self {
        Self { listings, recorder }
    }
}

#[async_trait]
impl<Q> GetListingUseCase for GetListingService<Q>
where
    Q: ListingQuery + Send + Sync,
{
    async fn execute(&self, actor: Actor, id: ListingId) -> Result<Listing, ListingError> {
        let listing = self
            .listings
            .find_by_id(id)
            .await?
            .ok_or(ListingError::NotFound)?;

        authorize(
            &actor,
            Action::Read,
            &Resource::Listing {
                owner: Some(listing.owner_id()),
            },
        )?;

        self.recorder.record(id, EventKind::View).await;
        Ok(listing)
    }
}
