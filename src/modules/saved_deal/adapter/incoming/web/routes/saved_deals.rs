use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::{access_denied, CurrentIdentity};
use crate::modules::listing::adapter::incoming::web::routes::{
    listing_responses, ListingResponse,
};
use crate::modules::listing::application::domain::entities::ListingId;
use crate::modules::saved_deal::application::ports::incoming::use_cases::SavedDealError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveDealRequestDto {
    pub business_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedDealResponse {
    #[schema(example = "Deal saved successfully!")]
    pub message: String,
    pub business: ListingResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedDealMessage {
    #[schema(example = "Deal removed successfully!")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleSavedDealResponse {
    pub saved: bool,
    pub message: String,
}

fn saved_deal_error_response(err: SavedDealError) -> HttpResponse {
    match err {
        SavedDealError::ListingNotFound => {
            ApiResponse::not_found("BUSINESS_NOT_FOUND", "Business not found")
        }
        SavedDealError::NotSaved => {
            ApiResponse::not_found("SAVED_DEAL_NOT_FOUND", "Deal not found in saved list")
        }
        SavedDealError::AlreadySaved => {
            ApiResponse::conflict("DEAL_ALREADY_SAVED", "Deal already saved")
        }
        SavedDealError::Access(e) => access_denied(e),
        SavedDealError::Internal(ref e) => {
            tracing::error!(error = %e, "Saved deal operation failed");
            ApiResponse::internal_error()
        }
    }
}

/// Saved deals
#[utoipa::path(
    get,
    path = "/api/v1/saved_deals",
    tag = "saved_deals",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Saved listings, most recent first", body = inline(SuccessResponse<Vec<ListingResponse>>)),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
    )
)]
#[get("/api/v1/saved_deals")]
pub async fn list_saved_deals_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.saved_deal.list.execute(current.actor()).await {
        Ok(listings) => ApiResponse::success(listing_responses(listings)),
        Err(e) => saved_deal_error_response(e),
    }
}

/// Save a deal
#[utoipa::path(
    post,
    path = "/api/v1/saved_deals",
    tag = "saved_deals",
    security(("BearerAuth" = [])),
    request_body = SaveDealRequestDto,
    responses(
        (status = 201, description = "Saved", body = inline(SuccessResponse<SavedDealResponse>)),
        (status = 404, description = "No such listing", body = ErrorResponse),
        (status = 409, description = "Already saved", body = ErrorResponse),
    )
)]
#[post("/api/v1/saved_deals")]
pub async fn save_deal_handler(
    current: CurrentIdentity,
    req: web::Json<SaveDealRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = ListingId::from(req.business_id);

    match data.saved_deal.save.execute(current.actor(), id).await {
        Ok(listing) => ApiResponse::created(SavedDealResponse {
            message: "Deal saved successfully!".to_string(),
            business: ListingResponse::from(listing),
        }),
        Err(e) => saved_deal_error_response(e),
    }
}

/// Remove a saved deal
#[utoipa::path(
    delete,
    path = "/api/v1/saved_deals/{business_id}",
    tag = "saved_deals",
    security(("BearerAuth" = [])),
    params(("business_id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Removed", body = inline(SuccessResponse<SavedDealMessage>)),
        (status = 404, description = "Not in the saved list", body = ErrorResponse),
    )
)]
#[delete("/api/v1/saved_deals/{business_id}")]
pub async fn remove_saved_deal_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = ListingId::from(path.into_inner());

    match data.saved_deal.remove.execute(current.actor(), id).await {
        Ok(()) => ApiResponse::success(SavedDealMessage {
            message: "Deal removed successfully!".to_string(),
        }),
        Err(e) => saved_deal_error_response(e),
    }
}

/// Toggle a saved deal
#[utoipa::path(
    post,
    path = "/api/v1/saved_deals/toggle",
    tag = "saved_deals",
    security(("BearerAuth" = [])),
    request_body = SaveDealRequestDto,
    responses(
        (status = 200, description = "New state", body = inline(SuccessResponse<ToggleSavedDealResponse>)),
        (status = 404, description = "No such listing", body = ErrorResponse),
    )
)]
#[post("/api/v1/saved_deals/toggle")]
pub async fn toggle_saved_deal_handler(
    current: CurrentIdentity,
    req: web::Json<SaveDealRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = ListingId::from(req.business_id);

    match data.saved_deal.toggle.execute(current.actor(), id).await {
        Ok(outcome) => {
            let message = if outcome.saved {
                "Deal saved successfully!"
            } else {
                "Deal removed successfully!"
            };
            ApiResponse::success(ToggleSavedDealResponse {
                saved: outcome.saved,
                message: message.to_string(),
            })
        }
        Err(e) => saved_deal_error_response(e),
    }
}
