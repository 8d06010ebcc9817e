use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::CurrentIdentity;
use crate::modules::listing::application::domain::entities::ListingId;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, patch, post, web, Responder};
use tracing::info;
use uuid::Uuid;

use super::listing_dto::{listing_error_response, ListingRequestDto, ListingResponse};

/// Create a listing
///
/// Partner and up. The listing starts in the configured moderation state.
#[utoipa::path(
    post,
    path = "/api/v1/businesses",
    tag = "businesses",
    security(("BearerAuth" = [])),
    request_body = ListingRequestDto,
    responses(
        (status = 201, description = "Listing created", body = inline(SuccessResponse<ListingResponse>)),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Role cannot create listings", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
    )
)]
#[post("/api/v1/businesses")]
pub async fn create_listing_handler(
    current: CurrentIdentity,
    req: web::Json<ListingRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let draft = req.into_inner().business.into();

    match data.listing.create.execute(current.actor(), draft).await {
        Ok(listing) => {
            info!(listing_id = %listing.id, user_id = %current.0.id, "Business created");
            ApiResponse::created(ListingResponse::from(listing))
        }
        Err(e) => listing_error_response(e),
    }
}

/// Update a listing
#[utoipa::path(
    patch,
    path = "/api/v1/businesses/{id}",
    tag = "businesses",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Listing id")),
    request_body = ListingRequestDto,
    responses(
        (status = 200, description = "Listing updated", body = inline(SuccessResponse<ListingResponse>)),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such listing", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
    )
)]
#[patch("/api/v1/businesses/{id}")]
pub async fn update_listing_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    req: web::Json<ListingRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = ListingId::from(path.into_inner());
    let patch = req.into_inner().business.into();

    match data.listing.update.execute(current.actor(), id, patch).await {
        Ok(listing) => ApiResponse::success(ListingResponse::from(listing)),
        Err(e) => listing_error_response(e),
    }
}

/// Delete a listing
///
/// Cascades to the listing's saved deals and analytics events.
#[utoipa::path(
    delete,
    path = "/api/v1/businesses/{id}",
    tag = "businesses",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such listing", body = ErrorResponse),
    )
)]
#[delete("/api/v1/businesses/{id}")]
pub async fn delete_listing_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = ListingId::from(path.into_inner());

    match data.listing.delete.execute(current.actor(), id).await {
        Ok(()) => {
            info!(listing_id = %id, user_id = %current.0.id, "Business deleted");
            ApiResponse::no_content()
        }
        Err(e) => listing_error_response(e),
    }
}
