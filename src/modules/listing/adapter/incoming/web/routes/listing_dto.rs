use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::modules::auth::adapter::incoming::web::extractors::access_denied;
use crate::modules::listing::application::domain::entities::Listing;
use crate::modules::listing::application::domain::listing_draft::{ListingDraft, ListingPatch};
use crate::modules::listing::application::ports::incoming::use_cases::ListingError;
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{Page, Pagination};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListingOwnerResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    pub name: String,
}

/// Public shape of a listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListingResponse {
    #[schema(example = "5f0c2b1e-8c1d-4f57-9f55-3f8f2f0e7a11")]
    pub id: String,
    #[schema(example = "Corner Bakery")]
    pub name: String,
    #[schema(example = "Food")]
    pub category: String,
    pub description: Option<String>,
    #[schema(example = "1 Main St, Springfield")]
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[schema(example = 4.5)]
    pub rating: f64,
    pub review_count: u32,
    pub image: Option<String>,
    pub featured: bool,
    pub has_deals: bool,
    pub deal: Option<String>,
    #[schema(value_type = Object)]
    pub hours: Value,
    #[schema(value_type = Vec<Object>)]
    pub amenities: Value,
    #[schema(value_type = Vec<Object>)]
    pub gallery: Value,
    /// `pending`, `approved` or `rejected`
    #[schema(example = "approved")]
    pub approval_status: String,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: ListingOwnerResponse,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id.to_string(),
            name: listing.name,
            category: listing.category,
            description: listing.description,
            address: listing.address,
            phone: listing.phone,
            email: listing.email,
            website: listing.website,
            rating: listing.rating,
            review_count: listing.review_count,
            image: listing.image_url,
            featured: listing.featured,
            has_deals: listing.has_deals,
            deal: listing.deal_description,
            hours: listing.hours,
            amenities: listing.amenities,
            gallery: listing.gallery,
            approval_status: listing.moderation.status.to_string(),
            approved_at: listing.moderation.approved_at,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            user: ListingOwnerResponse {
                id: listing.owner.id.to_string(),
                name: listing.owner.name,
            },
        }
    }
}

pub fn listing_responses(listings: Vec<Listing>) -> Vec<ListingResponse> {
    listings.into_iter().map(ListingResponse::from).collect()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListingPageResponse {
    pub businesses: Vec<ListingResponse>,
    pub pagination: Pagination,
}

impl From<Page<Listing>> for ListingPageResponse {
    fn from(page: Page<Listing>) -> Self {
        Self {
            businesses: listing_responses(page.items),
            pagination: page.pagination,
        }
    }
}

/// Writable listing fields. On create, name, category and address are
/// required; on update every field is optional.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ListingFields {
    #[schema(example = "Corner Bakery")]
    pub name: Option<String>,
    #[schema(example = "Food")]
    pub category: Option<String>,
    pub description: Option<String>,
    #[schema(example = "1 Main St, Springfield")]
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// Clamped into `[0, 5]`
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub image_url: Option<String>,
    pub has_deals: Option<bool>,
    pub deal_description: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub hours: Option<Value>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub amenities: Option<Value>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub gallery: Option<Value>,
}

/// `{ "business": { ... } }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListingRequestDto {
    pub business: ListingFields,
}

impl From<ListingFields> for ListingDraft {
    fn from(fields: ListingFields) -> Self {
        Self {
            name: fields.name.unwrap_or_default(),
            category: fields.category.unwrap_or_default(),
            description: fields.description,
            address: fields.address.unwrap_or_default(),
            phone: fields.phone,
            email: fields.email,
            website: fields.website,
            rating: fields.rating,
            review_count: fields.review_count,
            image_url: fields.image_url,
            has_deals: fields.has_deals,
            deal_description: fields.deal_description,
            hours: fields.hours,
            amenities: fields.amenities,
            gallery: fields.gallery,
        }
    }
}

impl From<ListingFields> for ListingPatch {
    fn from(fields: ListingFields) -> Self {
        Self {
            name: fields.name,
            category: fields.category,
            description: fields.description,
            address: fields.address,
            phone: fields.phone,
            email: fields.email,
            website: fields.website,
            rating: fields.rating,
            review_count: fields.review_count,
            image_url: fields.image_url,
            has_deals: fields.has_deals,
            deal_description: fields.deal_description,
            hours: fields.hours,
            amenities: fields.amenities,
            gallery: fields.gallery,
        }
    }
}

pub fn listing_error_response(err: ListingError) -> HttpResponse {
    match err {
        ListingError::NotFound => ApiResponse::not_found("BUSINESS_NOT_FOUND", "Business not found"),
        ListingError::Access(e) => access_denied(e),
        ListingError::ValidationFailed(errors) => ApiResponse::unprocessable(errors.messages()),
        ListingError::Internal(ref e) => {
            tracing::error!(error = %e, "Listing operation failed");
            ApiResponse::internal_error()
        }
    }
}
