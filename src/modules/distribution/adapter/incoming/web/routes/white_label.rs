use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::CurrentIdentity;
use crate::modules::distribution::application::domain::white_label::{
    WhiteLabel, WhiteLabelPatch,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, patch, web, Responder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use super::distribution_error_response;

#[derive(Debug, Serialize, ToSchema)]
pub struct WhiteLabelResponse {
    pub id: Uuid,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub brand_name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub custom_css: Option<String>,
    #[schema(value_type = Object)]
    pub settings: Value,
}

impl From<WhiteLabel> for WhiteLabelResponse {
    fn from(w: WhiteLabel) -> Self {
        Self {
            id: w.id,
            domain: w.domain,
            subdomain: w.subdomain,
            brand_name: w.brand_name,
            logo_url: w.logo_url,
            primary_color: w.primary_color,
            secondary_color: w.secondary_color,
            custom_css: w.custom_css,
            settings: w.settings,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WhiteLabelUpdatedResponse {
    pub white_label: WhiteLabelResponse,
    #[schema(example = "White label settings updated successfully")]
    pub message: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WhiteLabelFields {
    pub brand_name: Option<String>,
    #[schema(example = "guide.example.com")]
    pub domain: Option<String>,
    #[schema(example = "metro")]
    pub subdomain: Option<String>,
    pub logo_url: Option<String>,
    #[schema(example = "#1f6feb")]
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub custom_css: Option<String>,
    /// Keys given here replace the stored ones; others are kept.
    #[schema(value_type = Option<Object>)]
    pub settings: Option<Map<String, Value>>,
}

impl From<WhiteLabelFields> for WhiteLabelPatch {
    fn from(f: WhiteLabelFields) -> Self {
        Self {
            brand_name: f.brand_name,
            domain: f.domain,
            subdomain: f.subdomain,
            logo_url: f.logo_url,
            primary_color: f.primary_color,
            secondary_color: f.secondary_color,
            custom_css: f.custom_css,
            settings: f.settings,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateWhiteLabelRequestDto {
    pub white_label: WhiteLabelFields,
}

/// White label profile
///
/// Created on first access with the caller's name as brand.
#[utoipa::path(
    get,
    path = "/api/v1/distribution/white_label",
    tag = "distribution",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Branding profile", body = inline(SuccessResponse<WhiteLabelResponse>)),
        (status = 403, description = "Not a distribution partner", body = ErrorResponse),
    )
)]
#[get("/api/v1/distribution/white_label")]
pub async fn get_white_label_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.distribution.get_white_label.execute(current.actor()).await {
        Ok(profile) => ApiResponse::success(WhiteLabelResponse::from(profile)),
        Err(e) => distribution_error_response(e),
    }
}

/// Update white label profile
#[utoipa::path(
    patch,
    path = "/api/v1/distribution/white_label",
    tag = "distribution",
    security(("BearerAuth" = [])),
    request_body = UpdateWhiteLabelRequestDto,
    responses(
        (status = 200, description = "Profile updated", body = inline(SuccessResponse<WhiteLabelUpdatedResponse>)),
        (status = 403, description = "Not a distribution partner", body = ErrorResponse),
        (status = 409, description = "Domain or subdomain taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
    )
)]
#[patch("/api/v1/distribution/white_label")]
pub async fn update_white_label_handler(
    current: CurrentIdentity,
    req: web::Json<UpdateWhiteLabelRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let patch = req.into_inner().white_label.into();

    match data
        .distribution
        .update_white_label
        .execute(current.actor(), patch)
        .await
    {
        Ok(profile) => ApiResponse::success(WhiteLabelUpdatedResponse {
            white_label: WhiteLabelResponse::from(profile),
            message: "White label settings updated successfully".to_string(),
        }),
        Err(e) => distribution_error_response(e),
    }
}
