use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::analytics::application::domain::events::AnalyticsSummary;
use crate::modules::auth::adapter::incoming::web::extractors::CurrentIdentity;
use crate::modules::listing::application::domain::entities::ListingId;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::analytics_error_response;

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsSummaryResponse {
    pub total_views: u64,
    pub total_clicks: u64,
    /// Last 7 days
    pub weekly_views: u64,
    /// Last 7 days
    pub weekly_clicks: u64,
    pub phone_clicks: u64,
    pub email_clicks: u64,
    pub website_clicks: u64,
}

impl From<AnalyticsSummary> for AnalyticsSummaryResponse {
    fn from(s: AnalyticsSummary) -> Self {
        Self {
            total_views: s.total_views,
            total_clicks: s.total_clicks,
            weekly_views: s.weekly_views,
            weekly_clicks: s.weekly_clicks,
            phone_clicks: s.phone_clicks,
            email_clicks: s.email_clicks,
            website_clicks: s.website_clicks,
        }
    }
}

/// Listing analytics
///
/// Owner, distribution partner or admin.
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{id}/analytics",
    tag = "analytics",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Counters", body = inline(SuccessResponse<AnalyticsSummaryResponse>)),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such listing", body = ErrorResponse),
    )
)]
#[get("/api/v1/businesses/{id}/analytics")]
pub async fn listing_analytics_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = ListingId::from(path.into_inner());

    match data
        .analytics
        .listing_summary
        .execute(current.actor(), id)
        .await
    {
        Ok(summary) => ApiResponse::success(AnalyticsSummaryResponse::from(summary)),
        Err(e) => analytics_error_response(e),
    }
}
