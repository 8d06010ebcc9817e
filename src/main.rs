pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

use crate::api::openapi::ApiDoc;
use crate::modules::admin::adapter::outgoing::AdminQueryPostgres;
use crate::modules::admin::application::admin_use_cases::AdminUseCases;
use crate::modules::admin::application::service::{
    AccountModerationService, AdminOverviewService,
};
use crate::modules::analytics::adapter::outgoing::EventStorePostgres;
use crate::modules::analytics::application::analytics_use_cases::AnalyticsUseCases;
use crate::modules::analytics::application::helpers::AnalyticsRecorder;
use crate::modules::analytics::application::ports::outgoing::EventStore;
use crate::modules::analytics::application::service::{
    ListingAnalyticsService, TrackClickService,
};
use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::adapter::outgoing::security::Argon2Hasher;
use crate::modules::auth::adapter::outgoing::{IdentityQueryPostgres, IdentityRepositoryPostgres};
use crate::modules::auth::application::auth_use_cases::AuthUseCases;
use crate::modules::auth::application::helpers::SessionResolver;
use crate::modules::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::modules::auth::application::service::{AccountService, LoginService, SignupService};
use crate::modules::distribution::adapter::outgoing::WhiteLabelStorePostgres;
use crate::modules::distribution::application::distribution_use_cases::DistributionUseCases;
use crate::modules::distribution::application::service::{
    DistributionDashboardService, WhiteLabelService,
};
use crate::modules::listing::adapter::outgoing::{ListingQueryPostgres, ListingRepositoryPostgres};
use crate::modules::listing::application::domain::listing_policy::ListingPolicy;
use crate::modules::listing::application::listing_use_cases::ListingUseCases;
use crate::modules::listing::application::service::{
    GetListingService, ListingCommandService, ListingSearchService, ModerationService,
};
use crate::modules::saved_deal::adapter::outgoing::SavedDealStorePostgres;
use crate::modules::saved_deal::application::saved_deal_use_cases::SavedDealUseCases;
use crate::modules::saved_deal::application::service::SavedDealService;
use crate::shared::api::{custom_json_config, custom_query_config};
use crate::shared::cache::{
    CacheBackend, CacheConfig, CacheStore, InMemoryCacheStore, RedisCacheStore, ResultCache,
};

use actix_web::{web, App, HttpServer};
use deadpool_redis::{Config, Pool, Runtime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub session_resolver: SessionResolver,
    pub auth: AuthUseCases,
    pub listing: ListingUseCases,
    pub analytics: AnalyticsUseCases,
    pub saved_deal: SavedDealUseCases,
    pub distribution: DistributionUseCases,
    pub admin: AdminUseCases,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL is not set in .env file");

    let cache_config = CacheConfig::from_env();
    let listing_policy = ListingPolicy::from_env();

    let server_url = format!("{host}:{port}");
    info!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    Migrator::up(&conn, None)
        .await
        .expect("Failed to run database migrations");

    let db_arc = Arc::new(conn);

    // rediss:// URLs need a process-wide rustls crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider was already installed");
    }

    // Cache backend
    let redis_pool: Option<Arc<Pool>> = match cache_config.backend {
        CacheBackend::Redis => Some(Arc::new(
            Config::from_url(&redis_url)
                .create_pool(Some(Runtime::Tokio1))
                .expect("Failed to create Redis pool"),
        )),
        CacheBackend::Memory => {
            tracing::warn!("Using in-process cache store; entries are not shared between instances");
            None
        }
    };
    let cache_store: Arc<dyn CacheStore> = match &redis_pool {
        Some(pool) => Arc::new(RedisCacheStore::new(Arc::clone(pool))),
        None => Arc::new(InMemoryCacheStore::new()),
    };
    let cache = ResultCache::new(cache_store, cache_config.key_prefix.clone());

    // Security
    let tokens: Arc<dyn TokenProvider> = Arc::new(JwtTokenService::new(JwtConfig::from_env()));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::from_env());

    // Outgoing adapters
    let identity_query = IdentityQueryPostgres::new(Arc::clone(&db_arc));
    let identity_repo = IdentityRepositoryPostgres::new(Arc::clone(&db_arc));
    let listing_query = Arc::new(ListingQueryPostgres::new(Arc::clone(&db_arc)));
    let listing_repo = Arc::new(ListingRepositoryPostgres::new(Arc::clone(&db_arc)));
    let events: Arc<dyn EventStore> = Arc::new(EventStorePostgres::new(Arc::clone(&db_arc)));
    let saved_deal_store = Arc::new(SavedDealStorePostgres::new(Arc::clone(&db_arc)));
    let white_label_store = Arc::new(WhiteLabelStorePostgres::new(Arc::clone(&db_arc)));
    let admin_query = Arc::new(AdminQueryPostgres::new(Arc::clone(&db_arc)));

    // Auth
    let account = Arc::new(AccountService::new(
        identity_query.clone(),
        identity_repo.clone(),
        hasher.clone(),
        cache.clone(),
    ));
    let auth = AuthUseCases {
        login: Arc::new(LoginService::new(
            identity_query.clone(),
            hasher.clone(),
            tokens.clone(),
        )),
        signup: Arc::new(SignupService::new(
            identity_query.clone(),
            identity_repo.clone(),
            hasher,
            tokens.clone(),
        )),
        get_profile: account.clone(),
        update_profile: account.clone(),
        change_password: account.clone(),
        delete_account: account,
    };

    // Listings
    let search = Arc::new(ListingSearchService::new(
        listing_query.clone(),
        cache.clone(),
        &cache_config,
    ));
    let commands = Arc::new(ListingCommandService::new(
        listing_query.clone(),
        listing_repo.clone(),
        cache.clone(),
        listing_policy,
    ));
    let listing = ListingUseCases {
        search: search.clone(),
        autocomplete: search,
        get: Arc::new(GetListingService::new(
            listing_query.clone(),
            AnalyticsRecorder::new(events.clone()),
        )),
        mine: commands.clone(),
        create: commands.clone(),
        update: commands.clone(),
        delete: commands,
        moderate: Arc::new(ModerationService::new(
            listing_query.clone(),
            listing_repo,
            cache.clone(),
        )),
    };

    // Analytics
    let analytics = AnalyticsUseCases {
        track_click: Arc::new(TrackClickService::new(
            listing_query.clone(),
            AnalyticsRecorder::new(events.clone()),
        )),
        listing_summary: Arc::new(ListingAnalyticsService::new(
            listing_query.clone(),
            events.clone(),
        )),
    };

    // Saved deals
    let saved = Arc::new(SavedDealService::new(listing_query.clone(), saved_deal_store));
    let saved_deal = SavedDealUseCases {
        list: saved.clone(),
        save: saved.clone(),
        remove: saved.clone(),
        toggle: saved,
    };

    // Distribution
    let dashboard = Arc::new(DistributionDashboardService::new(
        listing_query.clone(),
        events,
    ));
    let white_label = Arc::new(WhiteLabelService::new(
        white_label_store,
        Arc::new(identity_query.clone()),
    ));
    let distribution = DistributionUseCases {
        dashboard: dashboard.clone(),
        listings: dashboard.clone(),
        stats: dashboard,
        get_white_label: white_label.clone(),
        update_white_label: white_label,
    };

    // Admin
    let overview = Arc::new(AdminOverviewService::new(admin_query, listing_query));
    let accounts = Arc::new(AccountModerationService::new(
        identity_query.clone(),
        identity_repo,
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

    let state = AppState {
        session_resolver: SessionResolver::new(tokens, Arc::new(identity_query)),
        auth,
        listing,
        analytics,
        saved_deal,
        distribution,
        admin,
    };

    let openapi = ApiDoc::openapi();
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .app_data(custom_query_config());

        if let Some(pool) = &redis_pool {
            app = app.app_data(web::Data::new(Arc::clone(pool)));
        }

        app.configure(init_routes).service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
        )
    })
    .bind(server_url)?
    .run()
    .await
}

/// Literal segments (`my`, `autocomplete`) are registered ahead of `{id}` so
/// they are not captured as listing ids.
#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::modules::admin::adapter::incoming::web::routes as admin;
    use crate::modules::analytics::adapter::incoming::web::routes as analytics;
    use crate::modules::auth::adapter::incoming::web::routes as auth;
    use crate::modules::distribution::adapter::incoming::web::routes as distribution;
    use crate::modules::listing::adapter::incoming::web::routes as listing;
    use crate::modules::saved_deal::adapter::incoming::web::routes as saved_deal;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(auth::signup_user_handler);
    cfg.service(auth::login_user_handler);
    cfg.service(auth::logout_user_handler);
    cfg.service(auth::current_user_handler);
    // Users
    cfg.service(auth::get_profile_handler);
    cfg.service(auth::update_profile_handler);
    cfg.service(auth::change_password_handler);
    cfg.service(auth::delete_account_handler);
    // Businesses
    cfg.service(listing::my_listings_handler);
    cfg.service(listing::autocomplete_handler);
    cfg.service(listing::search_listings_handler);
    cfg.service(listing::create_listing_handler);
    cfg.service(listing::get_listing_handler);
    cfg.service(listing::update_listing_handler);
    cfg.service(listing::delete_listing_handler);
    // Analytics
    cfg.service(analytics::track_click_handler);
    cfg.service(analytics::listing_analytics_handler);
    // Saved deals
    cfg.service(saved_deal::toggle_saved_deal_handler);
    cfg.service(saved_deal::list_saved_deals_handler);
    cfg.service(saved_deal::save_deal_handler);
    cfg.service(saved_deal::remove_saved_deal_handler);
    // Distribution
    cfg.service(distribution::distribution_dashboard_handler);
    cfg.service(distribution::distribution_listings_handler);
    cfg.service(distribution::distribution_stats_handler);
    cfg.service(distribution::get_white_label_handler);
    cfg.service(distribution::update_white_label_handler);
    // Admin
    cfg.service(admin::platform_stats_handler);
    cfg.service(admin::pending_approvals_handler);
    cfg.service(admin::admin_users_handler);
    cfg.service(admin::suspend_user_handler);
    cfg.service(admin::activate_user_handler);
    cfg.service(admin::delete_user_handler);
    cfg.service(admin::admin_listings_handler);
    cfg.service(admin::approve_listing_handler);
    cfg.service(admin::reject_listing_handler);
    cfg.service(admin::feature_listing_handler);
    cfg.service(admin::admin_delete_listing_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
