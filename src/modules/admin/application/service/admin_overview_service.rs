use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::modules::access::{authorize, Action, Actor, Resource};
use crate::modules::admin::application::domain::overview::{
    ListingAdminFilter, ManagedUser, PlatformStats, UserFilter, RECENT_DAYS,
};
use crate::modules::admin::application::ports::incoming::use_cases::{
    AdminError, AdminListingsUseCase, AdminUsersUseCase, PendingApprovalsUseCase,
    PlatformStatsUseCase,
};
use crate::modules::admin::application::ports::outgoing::AdminQuery;
use crate::modules::listing::application::domain::entities::Listing;
use crate::modules::listing::application::ports::outgoing::ListingQuery;
use crate::shared::pagination::{Page, PageRequest};

pub struct AdminOverviewService<A, Q>
where
    A: AdminQuery,
    Q: ListingQuery,
{
    admin: Arc<A>,
    listings: Arc<Q>,
}

impl<A, Q> AdminOverviewService<A, Q>
where
    A: AdminQuery,
    Q: ListingQuery,
{
    pub fn new(admin: Arc<A>, listings: Arc<Q>) -> Self {
        Self { admin, listings }
    }
}

fn require_admin(actor: &Actor) -> Result<(), AdminError> {
    Ok(authorize(actor, Action::Read, &Resource::AdminPanel)?)
}

#[async_trait]
impl<A, Q> PlatformStatsUseCase for AdminOverviewService<A, Q>
where
    A: AdminQuery + Send + Sync,
    Q: ListingQuery + Send + Sync,
{
    async fn execute(&self, actor: Actor) -> Result<PlatformStats, AdminError> {
        require_admin(&actor)?;
        let since = Utc::now() - Duration::days(RECENT_DAYS);
        Ok(self.admin.platform_stats(since).await?)
    }
}

#[async_trait]
impl<A, Q> AdminUsersUseCase for AdminOverviewService<A, Q>
where
    A: AdminQuery + Send + Sync,
    Q: ListingQuery + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Page<ManagedUser>, AdminError> {
        require_admin(&actor)?;
        Ok(self.admin.users(&filter, page).await?)
    }
}

#[async_trait]
impl<A, Q> AdminListingsUseCase for AdminOverviewService<A, Q>
where
    A: AdminQuery + Send + Sync,
    Q: ListingQuery + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        filter: ListingAdminFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, AdminError> {
        require_admin(&actor)?;

        let ids = self.admin.listing_ids(&filter, page).await?;
        let listings = self.listings.find_many(&ids.items).await?;

        Ok(Page {
            items: listings,
            pagination: ids.pagination,
        })
    }
}

#[async_trait]
impl<A, Q> PendingApprovalsUseCase for AdminOverviewService<A, Q>
where
    A: AdminQuery + Send + Sync,
    Q: ListingQuery + Send + Sync,
{
    async fn execute(&self, actor: Actor) -> Result<Vec<Listing>, AdminError> {
        require_admin(&actor)?;
        let ids = self.admin.pending_listing_ids().await?;
        Ok(self.listings.find_many(&ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::access::AccessError;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::modules::listing::application::domain::entities::ModerationStatus;
    use crate::tests::support::fakes::{
        InMemoryAdminQuery, InMemoryIdentities, InMemoryListings, InMemorySavedDeals,
    };
    use crate::tests::support::fixtures::{identity, listing, listing_owned_by};

    struct Harness {
        identities: InMemoryIdentities,
        listings: InMemoryListings,
        service: AdminOverviewService<InMemoryAdminQuery, InMemoryListings>,
    }

    fn harness() -> Harness {
        let identities = InMemoryIdentities::default();
        let listings = InMemoryListings::default();
        let saved = InMemorySavedDeals::default();
        let admin = InMemoryAdminQuery::new(identities.clone(), listings.clone(), saved);
        Harness {
            service: AdminOverviewService::new(Arc::new(admin), Arc::new(listings.clone())),
            identities,
            listings,
        }
    }

    #[tokio::test]
    async fn stats_count_roles_and_moderation() {
        let h = harness();
        let admin = identity(Role::Admin);
        let partner = identity(Role::Partner);
        h.identities.insert(admin.clone(), "x");
        h.identities.insert(partner.clone(), "x");
        h.identities.insert(identity(Role::User), "x");

        let mut featured = listing_owned_by("Corner Bakery", partner.id);
        featured.featured = true;
        h.listings.insert(featured);
        let mut approved = listing_owned_by("Harbour Books", partner.id);
        approved.moderation.status = ModerationStatus::Approved;
        h.listings.insert(approved);

        let stats = PlatformStatsUseCase::execute(&h.service, admin.actor())
            .await
            .unwrap();

        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_partners, 1);
        assert_eq!(stats.total_admins, 1);
        assert_eq!(stats.total_businesses, 2);
        assert_eq!(stats.featured_businesses, 1);
        assert_eq!(stats.pending_approvals, 1);
        assert_eq!(stats.recent_businesses, 2);
    }

    #[tokio::test]
    async fn pending_approvals_lists_only_pending() {
        let h = harness();
        let admin = identity(Role::Admin);
        let pending = h.listings.insert(listing("Corner Bakery"));
        let mut rejected = listing("Harbour Books");
        rejected.moderation.status = ModerationStatus::Rejected;
        h.listings.insert(rejected);

        let found = PendingApprovalsUseCase::execute(&h.service, admin.actor())
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, pending.id);
    }

    #[tokio::test]
    async fn user_search_is_case_insensitive_and_paged() {
        let h = harness();
        let admin = identity(Role::Admin);
        for i in 0..3 {
            let mut member = identity(Role::User);
            member.name = format!("Annika {i}");
            h.identities.insert(member, "x");
        }
        h.identities.insert(identity(Role::User), "x");

        let page = AdminUsersUseCase::execute(
            &h.service,
            admin.actor(),
            UserFilter {
                search: Some("annika".to_string()),
                role: None,
            },
            PageRequest::new(Some(1), Some(2)),
        )
        .await
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total_count, 3);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn listings_filter_by_status() {
        let h = harness();
        let admin = identity(Role::Admin);
        h.listings.insert(listing("Corner Bakery"));
        let mut approved = listing("Harbour Books");
        approved.moderation.status = ModerationStatus::Approved;
        h.listings.insert(approved);

        let page = AdminListingsUseCase::execute(
            &h.service,
            admin.actor(),
            ListingAdminFilter {
                status: Some(ModerationStatus::Approved),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Harbour Books");
    }

    #[tokio::test]
    async fn distribution_partners_are_kept_out() {
        let h = harness();
        let result =
            PlatformStatsUseCase::execute(&h.service, identity(Role::Distribution).actor()).await;
        assert!(matches!(result, Err(AdminError::Access(AccessError::Forbidden))));
    }
}
