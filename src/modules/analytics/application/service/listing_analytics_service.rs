use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::modules::access::{authorize, Action, Actor, Resource};
use crate::modules::analytics::application::domain::events::{
    AnalyticsSummary, ClickKind, EventFilter, TimeWindow, WEEKLY_WINDOW_DAYS,
};
use crate::modules::analytics::application::ports::incoming::use_cases::{
    AnalyticsError, ListingAnalyticsUseCase,
};
use crate::modules::analytics::application::ports::outgoing::EventStore;
use crate::modules::listing::application::domain::entities::ListingId;
use crate::modules::listing::application::ports::outgoing::ListingQuery;

/// Per-listing counters for the owner's dashboard.
pub struct ListingAnalyticsService<Q>
where
    Q: ListingQuery,
{
    listings: Arc<Q>,
    events: Arc<dyn EventStore>,
}

impl<Q> ListingAnalyticsService<Q>
where
    Q: ListingQuery,
{
    pub fn new(listings: Arc<Q>, events: Arc<dyn EventStore>) -> Self {
        Self { listings, events }
    }
}

#[async_trait]
impl<Q> ListingAnalyticsUseCase for ListingAnalyticsService<Q>
where
    Q: ListingQuery + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        listing: ListingId,
    ) -> Result<AnalyticsSummary, AnalyticsError> {
        let found = self
            .listings
            .find_by_id(listing)
            .await?
            .ok_or(AnalyticsError::NotFound)?;

        authorize(
            &actor,
            Action::Read,
            &Resource::Analytics {
                listing_owner: found.owner_id(),
            },
        )?;

        let week = Some(TimeWindow::last_days(WEEKLY_WINDOW_DAYS, Utc::now()));
        let events = &self.events;

        Ok(AnalyticsSummary {
            total_views: events.count(listing, EventFilter::Views, None).await?,
            total_clicks: events.count(listing, EventFilter::Clicks, None).await?,
            weekly_views: events.count(listing, EventFilter::Views, week).await?,
            weekly_clicks: events.count(listing, EventFilter::Clicks, week).await?,
            phone_clicks: events
                .count(listing, EventFilter::ClicksOf(ClickKind::Phone), None)
                .await?,
            email_clicks: events
                .count(listing, EventFilter::ClicksOf(ClickKind::Email), None)
                .await?,
            website_clicks: events
                .count(listing, EventFilter::ClicksOf(ClickKind::Website), None)
                .await?,
        })
    }
}
