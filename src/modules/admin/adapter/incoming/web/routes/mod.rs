pub mod admin_listings;
pub mod admin_stats;
pub mod admin_users;

pub use admin_listings::{
    admin_delete_listing_handler, admin_listings_handler, approve_listing_handler,
    feature_listing_handler, reject_listing_handler, AdminListingsParams,
    ModeratedListingResponse,
};
pub use admin_stats::{
    pending_approvals_handler, platform_stats_handler, PendingApprovalsResponse,
    PlatformStatsResponse,
};
pub use admin_users::{
    activate_user_handler, admin_users_handler, delete_user_handler, suspend_user_handler,
    AccountStateResponse, AdminUserPageResponse, AdminUserResponse, AdminUsersParams,
};

use crate::modules::admin::application::ports::incoming::use_cases::AdminError;
use crate::modules::auth::adapter::incoming::web::extractors::access_denied;
use crate::shared::api::ApiResponse;
use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminMessage {
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

impl AdminMessage {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

fn admin_error_response(err: AdminError) -> HttpResponse {
    match err {
        AdminError::UserNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        AdminError::Access(e) => access_denied(e),
        AdminError::Internal(ref e) => {
            tracing::error!(error = %e, "Admin operation failed");
            ApiResponse::internal_error()
        }
    }
}
