use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::CurrentIdentity;
use crate::modules::distribution::application::domain::dashboard::{DailyActivity, DashboardStats};
use crate::modules::listing::adapter::incoming::web::routes::{
    listing_responses, ListingResponse,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use super::distribution_error_response;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub total_businesses: u64,
    pub active_deals: u64,
    pub total_views: u64,
    pub total_clicks: u64,
    pub featured_businesses: u64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_businesses: s.total_businesses,
            active_deals: s.active_deals,
            total_views: s.total_views,
            total_clicks: s.total_clicks,
            featured_businesses: s.featured_businesses,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyViewsResponse {
    #[schema(example = "Mon")]
    pub date: String,
    pub views: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyClicksResponse {
    #[schema(example = "Mon")]
    pub date: String,
    pub clicks: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DistributionStatsResponse {
    pub weekly_views: Vec<DailyViewsResponse>,
    pub weekly_clicks: Vec<DailyClicksResponse>,
    /// Not tracked yet; always 0.
    pub total_revenue: u64,
    pub partner_count: u64,
}

impl From<Vec<DailyActivity>> for DistributionStatsResponse {
    fn from(days: Vec<DailyActivity>) -> Self {
        Self {
            weekly_views: days
                .iter()
                .map(|d| DailyViewsResponse {
                    date: d.label(),
                    views: d.views,
                })
                .collect(),
            weekly_clicks: days
                .iter()
                .map(|d| DailyClicksResponse {
                    date: d.label(),
                    clicks: d.clicks,
                })
                .collect(),
            total_revenue: 0,
            partner_count: 1,
        }
    }
}

/// Distribution dashboard
#[utoipa::path(
    get,
    path = "/api/v1/distribution/dashboard",
    tag = "distribution",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Totals over the caller's listings", body = inline(SuccessResponse<DashboardStatsResponse>)),
        (status = 403, description = "Not a distribution partner", body = ErrorResponse),
    )
)]
#[get("/api/v1/distribution/dashboard")]
pub async fn distribution_dashboard_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.distribution.dashboard.execute(current.actor()).await {
        Ok(stats) => ApiResponse::success(DashboardStatsResponse::from(stats)),
        Err(e) => distribution_error_response(e),
    }
}

/// Distribution partner's listings
#[utoipa::path(
    get,
    path = "/api/v1/distribution/businesses",
    tag = "distribution",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Own listings, newest first", body = inline(SuccessResponse<Vec<ListingResponse>>)),
        (status = 403, description = "Not a distribution partner", body = ErrorResponse),
    )
)]
#[get("/api/v1/distribution/businesses")]
pub async fn distribution_listings_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.distribution.listings.execute(current.actor()).await {
        Ok(listings) => ApiResponse::success(listing_responses(listings)),
        Err(e) => distribution_error_response(e),
    }
}

/// Daily activity
///
/// Views and clicks per day for today and the seven days before.
#[utoipa::path(
    get,
    path = "/api/v1/distribution/stats",
    tag = "distribution",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Per-day series", body = inline(SuccessResponse<DistributionStatsResponse>)),
        (status = 403, description = "Not a distribution partner", body = ErrorResponse),
    )
)]
#[get("/api/v1/distribution/stats")]
pub async fn distribution_stats_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.distribution.stats.execute(current.actor()).await {
        Ok(days) => ApiResponse::success(DistributionStatsResponse::from(days)),
        Err(e) => distribution_error_response(e),
    }
}
