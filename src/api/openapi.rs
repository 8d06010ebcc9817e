use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::modules::admin::adapter::incoming::web::routes::{
    AccountStateResponse, AdminMessage, AdminUserPageResponse, AdminUserResponse,
    ModeratedListingResponse, PendingApprovalsResponse, PlatformStatsResponse,
};
use crate::modules::analytics::adapter::incoming::web::routes::{
    AnalyticsSummaryResponse, TrackClickRequestDto, TrackClickResponse,
};
use crate::modules::auth::adapter::incoming::web::routes::{
    AuthResponse, ChangePasswordRequestDto, DeleteAccountRequestDto, LoginRequestDto,
    LogoutResponse, ProfileResponse, SignupRequestDto, UpdateProfileRequestDto, UserSummary,
};
use crate::modules::distribution::adapter::incoming::web::routes::{
    DailyClicksResponse, DailyViewsResponse, DashboardStatsResponse, DistributionStatsResponse,
    UpdateWhiteLabelRequestDto, WhiteLabelFields, WhiteLabelResponse, WhiteLabelUpdatedResponse,
};
use crate::modules::listing::adapter::incoming::web::routes::{
    ListingFields, ListingOwnerResponse, ListingPageResponse, ListingRequestDto, ListingResponse,
    SuggestionResponse,
};
use crate::modules::saved_deal::adapter::incoming::web::routes::{
    SaveDealRequestDto, SavedDealMessage, SavedDealResponse, ToggleSavedDealResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Business Directory API",
        version = "1.0.0",
        description = "Multi-tenant business directory: listings, saved deals, partner distribution and platform administration",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Auth
        crate::modules::auth::adapter::incoming::web::routes::signup_user::signup_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::login_user::login_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::logout_user::logout_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::current_user::current_user_handler,

        // Users
        crate::modules::auth::adapter::incoming::web::routes::account::get_profile_handler,
        crate::modules::auth::adapter::incoming::web::routes::account::update_profile_handler,
        crate::modules::auth::adapter::incoming::web::routes::account::change_password_handler,
        crate::modules::auth::adapter::incoming::web::routes::account::delete_account_handler,

        // Businesses
        crate::modules::listing::adapter::incoming::web::routes::search_listings::search_listings_handler,
        crate::modules::listing::adapter::incoming::web::routes::search_listings::autocomplete_handler,
        crate::modules::listing::adapter::incoming::web::routes::get_listing::my_listings_handler,
        crate::modules::listing::adapter::incoming::web::routes::get_listing::get_listing_handler,
        crate::modules::listing::adapter::incoming::web::routes::write_listing::create_listing_handler,
        crate::modules::listing::adapter::incoming::web::routes::write_listing::update_listing_handler,
        crate::modules::listing::adapter::incoming::web::routes::write_listing::delete_listing_handler,

        // Analytics
        crate::modules::analytics::adapter::incoming::web::routes::track_click::track_click_handler,
        crate::modules::analytics::adapter::incoming::web::routes::listing_analytics::listing_analytics_handler,

        // Saved deals
        crate::modules::saved_deal::adapter::incoming::web::routes::saved_deals::list_saved_deals_handler,
        crate::modules::saved_deal::adapter::incoming::web::routes::saved_deals::save_deal_handler,
        crate::modules::saved_deal::adapter::incoming::web::routes::saved_deals::remove_saved_deal_handler,
        crate::modules::saved_deal::adapter::incoming::web::routes::saved_deals::toggle_saved_deal_handler,

        // Distribution
        crate::modules::distribution::adapter::incoming::web::routes::dashboard::distribution_dashboard_handler,
        crate::modules::distribution::adapter::incoming::web::routes::dashboard::distribution_listings_handler,
        crate::modules::distribution::adapter::incoming::web::routes::dashboard::distribution_stats_handler,
        crate::modules::distribution::adapter::incoming::web::routes::white_label::get_white_label_handler,
        crate::modules::distribution::adapter::incoming::web::routes::white_label::update_white_label_handler,

        // Admin
        crate::modules::admin::adapter::incoming::web::routes::admin_stats::platform_stats_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_stats::pending_approvals_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_users::admin_users_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_users::suspend_user_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_users::activate_user_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_users::delete_user_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_listings::admin_listings_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_listings::approve_listing_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_listings::reject_listing_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_listings::feature_listing_handler,
        crate::modules::admin::adapter::incoming::web::routes::admin_listings::admin_delete_listing_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<AuthResponse>,
            ErrorResponse,
            ErrorDetail,

            // Auth DTOs
            SignupRequestDto,
            LoginRequestDto,
            AuthResponse,
            UserSummary,
            LogoutResponse,
            ProfileResponse,
            UpdateProfileRequestDto,
            ChangePasswordRequestDto,
            DeleteAccountRequestDto,

            // Business DTOs
            ListingRequestDto,
            ListingFields,
            ListingResponse,
            ListingOwnerResponse,
            ListingPageResponse,
            SuggestionResponse,

            // Analytics DTOs
            TrackClickRequestDto,
            TrackClickResponse,
            AnalyticsSummaryResponse,

            // Saved deal DTOs
            SaveDealRequestDto,
            SavedDealResponse,
            SavedDealMessage,
            ToggleSavedDealResponse,

            // Distribution DTOs
            DashboardStatsResponse,
            DailyViewsResponse,
            DailyClicksResponse,
            DistributionStatsResponse,
            WhiteLabelResponse,
            WhiteLabelFields,
            UpdateWhiteLabelRequestDto,
            WhiteLabelUpdatedResponse,

            // Admin DTOs
            PlatformStatsResponse,
            PendingApprovalsResponse,
            AdminUserResponse,
            AdminUserPageResponse,
            AccountStateResponse,
            ModeratedListingResponse,
            AdminMessage
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "Account self-service endpoints"),
        (name = "businesses", description = "Business listing search and management"),
        (name = "analytics", description = "Listing view and click analytics"),
        (name = "saved_deals", description = "Saved deal bookmarks"),
        (name = "distribution", description = "Distribution partner dashboard and white-label settings"),
        (name = "admin", description = "Platform administration"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_business_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/businesses",
            "/api/v1/businesses/{id}",
            "/api/v1/businesses/autocomplete",
            "/api/v1/saved_deals/toggle",
            "/api/v1/distribution/white_label",
            "/api/v1/admin/users/{id}/suspend",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerAuth"));
    }
}
