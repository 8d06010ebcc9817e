use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::access::{authorize, Action, Actor, Resource};
use crate::modules::analytics::application::domain::events::{ClickKind, EventKind};
use crate::modules::analytics::application::helpers::AnalyticsRecorder;
use crate::modules::analytics::application::ports::incoming::use_cases::{
    AnalyticsError, TrackClickUseCase,
};
use crate::modules::listing::application::domain::entities::ListingId;
use crate::modules::listing::application::ports::outgoing::ListingQuery;
use crate::shared::validation::ValidationErrors;

pub struct TrackClickService<Q>
where
    Q: ListingQuery,
{
    listings: Arc<Q>,
    recorder: AnalyticsRecorder,
}

impl<Q> TrackClickService<Q>
where
    Q: ListingQuery,
{
    pub fn new(listings: Arc<Q>, recorder: AnalyticsRecorder) -> Self {
        Self { listings, recorder }
    }
}

fn parse_click_type(raw: Option<String>) -> Result<Option<ClickKind>, AnalyticsError> {
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse::<ClickKind>().map(Some).map_err(|_| {
            AnalyticsError::ValidationFailed(ValidationErrors::from(
                "Click type is not included in the list",
            ))
        }),
    }
}

#[async_trait]
impl<Q> TrackClickUseCase for TrackClickService<Q>
where
    Q: ListingQuery + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        listing: ListingId,
        click_type: Option<String>,
    ) -> Result<(), AnalyticsError> {
        let click = parse_click_type(click_type)?;

        let found = self
            .listings
            .find_by_id(listing)
            .await?
            .ok_or(AnalyticsError::NotFound)?;

        authorize(
            &actor,
            Action::Track,
            &Resource::Listing {
                owner: Some(found.owner_id()),
            },
        )?;

        self.recorder.record(listing, EventKind::Click(click)).await;
        Ok(())
    }
}
