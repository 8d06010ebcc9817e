use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::access::{authorize, Action, Resource};
use crate::modules::admin::application::domain::overview::ListingAdminFilter;
use crate::modules::auth::adapter::incoming::web::extractors::{access_denied, CurrentIdentity};
use crate::modules::listing::adapter::incoming::web::routes::{
    listing_error_response, ListingPageResponse, ListingResponse,
};
use crate::modules::listing::application::domain::entities::{ListingId, ModerationStatus};
use crate::modules::listing::application::ports::incoming::use_cases::ModerationCommand;
use crate::shared::api::ApiResponse;
use crate::shared::pagination::PageRequest;
use crate::AppState;
use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{admin_error_response, AdminMessage};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminListingsParams {
    /// Case-insensitive match on name or description
    pub search: Option<String>,
    pub category: Option<String>,
    /// `true` keeps featured listings only
    pub featured: Option<String>,
    /// `pending`, `approved` or `rejected`
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn non_blank(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl AdminListingsParams {
    fn to_filter(&self) -> Result<ListingAdminFilter, HttpResponse> {
        let status = match non_blank(&self.status) {
            None => None,
            Some(raw) => Some(raw.parse::<ModerationStatus>().map_err(|_| {
                ApiResponse::unprocessable(&[
                    "Approval status is not included in the list".to_string()
                ])
            })?),
        };
        Ok(ListingAdminFilter {
            search: non_blank(&self.search),
            category: non_blank(&self.category),
            featured_only: self.featured.as_deref() == Some("true"),
            status,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModeratedListingResponse {
    #[schema(example = "Business approved successfully")]
    pub message: String,
    pub business: ListingResponse,
}

/// List every listing
///
/// Unlike the public search this includes pending and rejected listings.
#[utoipa::path(
    get,
    path = "/api/v1/admin/businesses",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(AdminListingsParams),
    responses(
        (status = 200, description = "One page of listings, newest first", body = inline(SuccessResponse<ListingPageResponse>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Unknown status filter", body = ErrorResponse),
    )
)]
#[get("/api/v1/admin/businesses")]
pub async fn admin_listings_handler(
    current: CurrentIdentity,
    params: web::Query<AdminListingsParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let filter = match params.to_filter() {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let page = PageRequest::new(params.page, params.per_page);

    match data.admin.listings.execute(current.actor(), filter, page).await {
        Ok(page) => ApiResponse::success(ListingPageResponse::from(page)),
        Err(e) => admin_error_response(e),
    }
}

async fn moderate(
    current: CurrentIdentity,
    id: Uuid,
    command: ModerationCommand,
    data: web::Data<AppState>,
) -> HttpResponse {
    let id = ListingId::from(id);

    match data.listing.moderate.execute(current.actor(), id, command).await {
        Ok(listing) => {
            let message = match command {
                ModerationCommand::Approve => "Business approved successfully",
                ModerationCommand::Reject => "Business rejected",
                ModerationCommand::ToggleFeatured if listing.featured => {
                    "Business featured successfully"
                }
                ModerationCommand::ToggleFeatured => "Business unfeatured successfully",
            };
            ApiResponse::success(ModeratedListingResponse {
                message: message.to_string(),
                business: ListingResponse::from(listing),
            })
        }
        Err(e) => listing_error_response(e),
    }
}

/// Approve a listing
///
/// Records the approving admin and time. The listing becomes publicly
/// searchable.
#[utoipa::path(
    patch,
    path = "/api/v1/admin/businesses/{id}/approve",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing approved", body = inline(SuccessResponse<ModeratedListingResponse>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "No such listing", body = ErrorResponse),
    )
)]
#[patch("/api/v1/admin/businesses/{id}/approve")]
pub async fn approve_listing_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    moderate(current, path.into_inner(), ModerationCommand::Approve, data).await
}

/// Reject a listing
#[utoipa::path(
    patch,
    path = "/api/v1/admin/businesses/{id}/reject",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing rejected", body = inline(SuccessResponse<ModeratedListingResponse>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "No such listing", body = ErrorResponse),
    )
)]
#[patch("/api/v1/admin/businesses/{id}/reject")]
pub async fn reject_listing_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    moderate(current, path.into_inner(), ModerationCommand::Reject, data).await
}

/// Flip the featured flag
#[utoipa::path(
    patch,
    path = "/api/v1/admin/businesses/{id}/feature",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Featured flag toggled", body = inline(SuccessResponse<ModeratedListingResponse>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "No such listing", body = ErrorResponse),
    )
)]
#[patch("/api/v1/admin/businesses/{id}/feature")]
pub async fn feature_listing_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    moderate(
        current,
        path.into_inner(),
        ModerationCommand::ToggleFeatured,
        data,
    )
    .await
}

/// Delete any listing
#[utoipa::path(
    delete,
    path = "/api/v1/admin/businesses/{id}",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing deleted", body = inline(SuccessResponse<AdminMessage>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "No such listing", body = ErrorResponse),
    )
)]
#[delete("/api/v1/admin/businesses/{id}")]
pub async fn admin_delete_listing_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let actor = current.actor();
    if let Err(e) = authorize(&actor, Action::Read, &Resource::AdminPanel) {
        return access_denied(e);
    }
    let id = ListingId::from(path.into_inner());

    match data.listing.delete.execute(actor, id).await {
        Ok(()) => {
            info!(listing_id = %id, admin_id = %current.0.id, "Business deleted by admin");
            ApiResponse::success(AdminMessage::new("Business deleted successfully"))
        }
        Err(e) => listing_error_response(e),
    }
}
