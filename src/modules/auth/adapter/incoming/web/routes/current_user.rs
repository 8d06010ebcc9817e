use super::login_user::UserSummary;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::CurrentIdentity;
use crate::shared::api::ApiResponse;
use actix_web::{get, Responder};

/// Current identity
///
/// Returns the account the bearer token belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Signed-in account", body = inline(SuccessResponse<UserSummary>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Account suspended", body = ErrorResponse),
    )
)]
#[get("/api/v1/auth/me")]
pub async fn current_user_handler(current: CurrentIdentity) -> impl Responder {
    ApiResponse::success(UserSummary::from(&current.0))
}
