pub mod listing_analytics;
pub mod track_click;

pub use listing_analytics::{listing_analytics_handler, AnalyticsSummaryResponse};
pub use track_click::{track_click_handler, TrackClickRequestDto, TrackClickResponse};

use crate::modules::analytics::application::ports::incoming::use_cases::AnalyticsError;
use crate::modules::auth::adapter::incoming::web::extractors::access_denied;
use crate::shared::api::ApiResponse;
use actix_web::HttpResponse;

fn analytics_error_response(err: AnalyticsError) -> HttpResponse {
    match err {
        AnalyticsError::NotFound => ApiResponse::not_found("BUSINESS_NOT_FOUND", "Business not found"),
        AnalyticsError::Access(e) => access_denied(e),
        AnalyticsError::ValidationFailed(errors) => ApiResponse::unprocessable(errors.messages()),
        AnalyticsError::Internal(ref e) => {
            tracing::error!(error = %e, "Analytics operation failed");
            ApiResponse::internal_error()
        }
    }
}
