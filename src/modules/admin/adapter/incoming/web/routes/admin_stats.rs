use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::application::domain::overview::PlatformStats;
use crate::modules::auth::adapter::incoming::web::extractors::CurrentIdentity;
use crate::modules::listing::adapter::incoming::web::routes::{
    listing_responses, ListingResponse,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use super::admin_error_response;

#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformStatsResponse {
    pub total_users: u64,
    pub total_businesses: u64,
    pub total_partners: u64,
    pub total_distribution_partners: u64,
    pub total_admins: u64,
    pub featured_businesses: u64,
    pub businesses_with_deals: u64,
    pub total_saved_deals: u64,
    /// Accounts created in the last 7 days
    pub recent_signups: u64,
    /// Listings created in the last 7 days
    pub recent_businesses: u64,
    pub pending_approvals: u64,
}

impl From<PlatformStats> for PlatformStatsResponse {
    fn from(s: PlatformStats) -> Self {
        Self {
            total_users: s.total_users,
            total_businesses: s.total_businesses,
            total_partners: s.total_partners,
            total_distribution_partners: s.total_distribution_partners,
            total_admins: s.total_admins,
            featured_businesses: s.featured_businesses,
            businesses_with_deals: s.businesses_with_deals,
            total_saved_deals: s.total_saved_deals,
            recent_signups: s.recent_signups,
            recent_businesses: s.recent_businesses,
            pending_approvals: s.pending_approvals,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingApprovalsResponse {
    pub businesses: Vec<ListingResponse>,
    pub count: usize,
}

/// Platform statistics
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    tag = "admin",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Platform-wide counters", body = inline(SuccessResponse<PlatformStatsResponse>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    )
)]
#[get("/api/v1/admin/stats")]
pub async fn platform_stats_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.admin.stats.execute(current.actor()).await {
        Ok(stats) => ApiResponse::success(PlatformStatsResponse::from(stats)),
        Err(e) => admin_error_response(e),
    }
}

/// Listings awaiting approval
#[utoipa::path(
    get,
    path = "/api/v1/admin/pending_approvals",
    tag = "admin",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Pending listings, newest first", body = inline(SuccessResponse<PendingApprovalsResponse>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    )
)]
#[get("/api/v1/admin/pending_approvals")]
pub async fn pending_approvals_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.admin.pending.execute(current.actor()).await {
        Ok(listings) => ApiResponse::success(PendingApprovalsResponse {
            count: listings.len(),
            businesses: listing_responses(listings),
        }),
        Err(e) => admin_error_response(e),
    }
}
