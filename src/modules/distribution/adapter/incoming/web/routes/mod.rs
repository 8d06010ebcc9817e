pub mod dashboard;
pub mod white_label;

pub use dashboard::{
    distribution_dashboard_handler, distribution_listings_handler, distribution_stats_handler,
    DailyClicksResponse, DailyViewsResponse, DashboardStatsResponse, DistributionStatsResponse,
};
pub use white_label::{
    get_white_label_handler, update_white_label_handler, UpdateWhiteLabelRequestDto,
    WhiteLabelFields, WhiteLabelResponse, WhiteLabelUpdatedResponse,
};

use crate::modules::auth::adapter::incoming::web::extractors::access_denied;
use crate::modules::distribution::application::ports::incoming::use_cases::DistributionError;
use crate::shared::api::ApiResponse;
use actix_web::HttpResponse;

fn distribution_error_response(err: DistributionError) -> HttpResponse {
    match err {
        DistributionError::Access(e) => access_denied(e),
        DistributionError::ValidationFailed(errors) => ApiResponse::unprocessable(errors.messages()),
        DistributionError::Conflict(message) => {
            ApiResponse::conflict("WHITE_LABEL_CONFLICT", &message)
        }
        DistributionError::Internal(ref e) => {
            tracing::error!(error = %e, "Distribution operation failed");
            ApiResponse::internal_error()
        }
    }
}
