use std::sync::Arc;

use actix_web::web;

use crate::modules::admin::application::admin_use_cases::AdminUseCases;
use crate::modules::admin::application::service::{
    AccountModerationService, AdminOverviewService,
};
use crate::modules::analytics::application::analytics_use_cases::AnalyticsUseCases;
use crate::modules::analytics::application::helpers::AnalyticsRecorder;
use crate::modules::analytics::application::ports::outgoing::EventStore;
use crate::modules::analytics::application::service::{
    ListingAnalyticsService, TrackClickService,
};
use crate::modules::auth::application::auth_use_cases::AuthUseCases;
use crate::modules::auth::application::domain::entities::Identity;
use crate::modules::auth::application::helpers::SessionResolver;
use crate::modules::auth::application::ports::incoming::use_cases::{
    ChangePasswordUseCase, DeleteAccountUseCase, GetProfileUseCase, LoginUseCase, SignupUseCase,
    UpdateProfileUseCase,
};
use crate::modules::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::modules::auth::application::service::{AccountService, LoginService, SignupService};
use crate::modules::distribution::application::distribution_use_cases::DistributionUseCases;
use crate::modules::distribution::application::service::{
    DistributionDashboardService, WhiteLabelService,
};
use crate::modules::listing::application::domain::listing_policy::ListingPolicy;
use crate::modules::listing::application::listing_use_cases::ListingUseCases;
use crate::modules::listing::application::service::{
    GetListingService, ListingCommandService, ListingSearchService, ModerationService,
};
use crate::modules::saved_deal::application::saved_deal_use_cases::SavedDealUseCases;
use crate::modules::saved_deal::application::service::SavedDealService;
use crate::shared::cache::{CacheConfig, InMemoryCacheStore, ResultCache};
use crate::tests::support::fakes::{
    InMemoryAdminQuery, InMemoryEvents, InMemoryIdentities, InMemoryListings, InMemorySavedDeals,
    InMemoryWhiteLabels, PlainHasher,
};
use crate::tests::support::fixtures::test_token_service;
use crate::AppState;

/// Real services over in-memory fakes.
///
/// Each auth use case can be swapped for a hand-written double; everything
/// else runs the production service code against the fakes.
#[derive(Default)]
pub struct TestAppStateBuilder {
    identities: InMemoryIdentities,
    listings: InMemoryListings,
    events: Option<InMemoryEvents>,
    saved_deals: InMemorySavedDeals,
    white_labels: InMemoryWhiteLabels,
    login: Option<Arc<dyn LoginUseCase + Send + Sync>>,
    signup: Option<Arc<dyn SignupUseCase + Send + Sync>>,
    get_profile: Option<Arc<dyn GetProfileUseCase + Send + Sync>>,
    update_profile: Option<Arc<dyn UpdateProfileUseCase + Send + Sync>>,
    change_password: Option<Arc<dyn ChangePasswordUseCase + Send + Sync>>,
    delete_account: Option<Arc<dyn DeleteAccountUseCase + Send + Sync>>,
}

impl TestAppStateBuilder {
    /// Replaces the identity store. Call before `with_identity`.
    pub fn with_identities(mut self, store: InMemoryIdentities) -> Self {
        self.identities = store;
        self
    }

    /// Registers an account so its bearer token resolves.
    pub fn with_identity(self, identity: Identity) -> Self {
        self.identities.insert(identity, "hash");
        self
    }

    pub fn with_listings(mut self, store: InMemoryListings) -> Self {
        self.listings = store;
        self
    }

    pub fn with_events(mut self, store: InMemoryEvents) -> Self {
        self.events = Some(store);
        self
    }

    pub fn with_saved_deals(mut self, store: InMemorySavedDeals) -> Self {
        self.saved_deals = store;
        self
    }

    pub fn with_white_labels(mut self, store: InMemoryWhiteLabels) -> Self {
        self.white_labels = store;
        self
    }

    pub fn with_login(mut self, uc: impl LoginUseCase + Send + Sync + 'static) -> Self {
        self.login = Some(Arc::new(uc));
        self
    }

    pub fn with_signup(mut self, uc: impl SignupUseCase + Send + Sync + 'static) -> Self {
        self.signup = Some(Arc::new(uc));
        self
    }

    pub fn with_get_profile(mut self, uc: impl GetProfileUseCase + Send + Sync + 'static) -> Self {
        self.get_profile = Some(Arc::new(uc));
        self
    }

    pub fn with_update_profile(
        mut self,
        uc: impl UpdateProfileUseCase + Send + Sync + 'static,
    ) -> Self {
        self.update_profile = Some(Arc::new(uc));
        self
    }

    pub fn with_change_password(
        mut self,
        uc: impl ChangePasswordUseCase + Send + Sync + 'static,
    ) -> Self {
        self.change_password = Some(Arc::new(uc));
        self
    }

    pub fn with_delete_account(
        mut self,
        uc: impl DeleteAccountUseCase + Send + Sync + 'static,
    ) -> Self {
        self.delete_account = Some(Arc::new(uc));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let cache = ResultCache::new(Arc::new(InMemoryCacheStore::new()), "test");
        let tokens: Arc<dyn TokenProvider> = Arc::new(test_token_service());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(PlainHasher);
        let identities = self.identities;
        let events: Arc<dyn EventStore> = Arc::new(
            self.events
                .unwrap_or_else(|| InMemoryEvents::for_listings(&self.listings)),
        );
        let listings = Arc::new(self.listings.clone());

        let account = Arc::new(AccountService::new(
            identities.clone(),
            identities.clone(),
            hasher.clone(),
            cache.clone(),
        ));
        let auth = AuthUseCases {
            login: self.login.unwrap_or_else(|| {
                Arc::new(LoginService::new(
                    identities.clone(),
                    hasher.clone(),
                    tokens.clone(),
                ))
            }),
            signup: self.signup.unwrap_or_else(|| {
                Arc::new(SignupService::new(
                    identities.clone(),
                    identities.clone(),
                    hasher.clone(),
                    tokens.clone(),
                ))
            }),
            get_profile: self.get_profile.unwrap_or_else(|| account.clone()),
            update_profile: self.update_profile.unwrap_or_else(|| account.clone()),
            change_password: self.change_password.unwrap_or_else(|| account.clone()),
            delete_account: self.delete_account.unwrap_or_else(|| account.clone()),
        };

        let search = Arc::new(ListingSearchService::new(
            listings.clone(),
            cache.clone(),
            &CacheConfig::default(),
        ));
        let commands = Arc::new(ListingCommandService::new(
            listings.clone(),
            listings.clone(),
            cache.clone(),
            ListingPolicy::default(),
        ));
        let listing = ListingUseCases {
            search: search.clone(),
            autocomplete: search,
            get: Arc::new(GetListingService::new(
                listings.clone(),
                AnalyticsRecorder::new(events.clone()),
            )),
            mine: commands.clone(),
            create: commands.clone(),
            update: commands.clone(),
            delete: commands,
            moderate: Arc::new(ModerationService::new(
                listings.clone(),
                listings.clone(),
                cache.clone(),
            )),
        };

        let analytics = AnalyticsUseCases {
            track_click: Arc::new(TrackClickService::new(
                listings.clone(),
                AnalyticsRecorder::new(events.clone()),
            )),
            listing_summary: Arc::new(ListingAnalyticsService::new(
                listings.clone(),
                events.clone(),
            )),
        };

        let saved = Arc::new(SavedDealService::new(
            listings.clone(),
            Arc::new(self.saved_deals.clone()),
        ));
        let saved_deal = SavedDealUseCases {
            list: saved.clone(),
            save: saved.clone(),
            remove: saved.clone(),
            toggle: saved,
        };

        let dashboard = Arc::new(DistributionDashboardService::new(
            listings.clone(),
            events,
        ));
        let white_label = Arc::new(WhiteLabelService::new(
            Arc::new(self.white_labels),
            Arc::new(identities.clone()),
        ));
        let distribution = DistributionUseCases {
            dashboard: dashboard.clone(),
            listings: dashboard.clone(),
            stats: dashboard,
            get_white_label: white_label.clone(),
            update_white_label: white_label,
        };

        let overview = Arc::new(AdminOverviewService::new(
            Arc::new(InMemoryAdminQuery::new(
                identities.clone(),
                self.listings,
                self.saved_deals,
            )),
            listings,
        ));
        let accounts = Arc::new(AccountModerationService::new(
            identities.clone(),
            identities.clone(),
            cache,
        ));
        let admin = AdminUseCases {
            stats: overview.clone(),
            users: overview.clone(),
            listings: overview.clone(),
            pending: overview,
            set_account_state: accounts.clone(),
            delete_user: accounts,
        };

        web::Data::new(AppState {
            session_resolver: SessionResolver::new(tokens, Arc::new(identities)),
            auth,
            listing,
            analytics,
            saved_deal,
            distribution,
            admin,
        })
    }
}
