use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::CurrentIdentity;
use crate::shared::api::ApiResponse;
use actix_web::{post, Responder};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

/// Logout
///
/// Tokens are stateless; the client discards its copy. The endpoint only
/// confirms the token was still valid.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Logged out", body = inline(SuccessResponse<LogoutResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/logout")]
pub async fn logout_user_handler(current: CurrentIdentity) -> impl Responder {
    info!(user_id = %current.0.id, "User logged out");
    ApiResponse::success(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}
