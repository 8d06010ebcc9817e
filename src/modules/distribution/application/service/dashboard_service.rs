use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::modules::access::{authorize, AccessError, Action, Actor, Resource};
use crate::modules::analytics::application::domain::events::{EventFilter, TimeWindow};
use crate::modules::analytics::application::ports::outgoing::EventStore;
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::distribution::application::domain::dashboard::{
    activity_days, DailyActivity, DashboardStats,
};
use crate::modules::distribution::application::ports::incoming::use_cases::{
    DistributionDashboardUseCase, DistributionError, DistributionListingsUseCase,
    DistributionStatsUseCase,
};
use crate::modules::listing::application::domain::entities::Listing;
use crate::modules::listing::application::ports::outgoing::ListingQuery;

/// Read-only views over the listings a distribution partner owns.
pub struct DistributionDashboardService<Q>
where
    Q: ListingQuery,
{
    listings: Arc<Q>,
    events: Arc<dyn EventStore>,
}

impl<Q> DistributionDashboardService<Q>
where
    Q: ListingQuery,
{
    pub fn new(listings: Arc<Q>, events: Arc<dyn EventStore>) -> Self {
        Self { listings, events }
    }

    fn panel_owner(actor: &Actor) -> Result<UserId, DistributionError> {
        authorize(actor, Action::Read, &Resource::DistributionPanel)?;
        Ok(actor.id().ok_or(AccessError::Forbidden)?)
    }
}

#[async_trait]
impl<Q> DistributionDashboardUseCase for DistributionDashboardService<Q>
where
    Q: ListingQuery + Send + Sync,
{
    async fn execute(&self, actor: Actor) -> Result<DashboardStats, DistributionError> {
        let owner = Self::panel_owner(&actor)?;
        let owned = self.listings.list_by_owner(owner).await?;

        let count = |pred: fn(&Listing) -> bool| owned.iter().filter(|l| pred(l)).count() as u64;

        Ok(DashboardStats {
            total_businesses: owned.len() as u64,
            active_deals: count(|l| l.has_deals),
            featured_businesses: count(|l| l.featured),
            total_views: self
                .events
                .count_for_owner(owner, EventFilter::Views, None)
                .await?,
            total_clicks: self
                .events
                .count_for_owner(owner, EventFilter::Clicks, None)
                .await?,
        })
    }
}

#[async_trait]
impl<Q> DistributionListingsUseCase for DistributionDashboardService<Q>
where
    Q: ListingQuery + Send + Sync,
{
    async fn execute(&self, actor: Actor) -> Result<Vec<Listing>, DistributionError> {
        let owner = Self::panel_owner(&actor)?;
        Ok(self.listings.list_by_owner(owner).await?)
    }
}

#[async_trait]
impl<Q> DistributionStatsUseCase for DistributionDashboardService<Q>
where
    Q: ListingQuery + Send + Sync,
{
    async fn execute(&self, actor: Actor) -> Result<Vec<DailyActivity>, DistributionError> {
        let owner = Self::panel_owner(&actor)?;
        let today = Utc::now().date_naive();

        let mut days = Vec::new();
        for date in activity_days(today) {
            let window = Some(TimeWindow::day(date));
            days.push(DailyActivity {
                date,
                views: self
                    .events
                    .count_for_owner(owner, EventFilter::Views, window)
                    .await?,
                clicks: self
                    .events
                    .count_for_owner(owner, EventFilter::Clicks, window)
                    .await?,
            });
        }
        Ok(days)
    }
}
