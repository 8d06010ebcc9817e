use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::access::{authorize, Action, Resource};
use crate::modules::auth::adapter::incoming::web::extractors::{access_denied, CurrentIdentity};
use crate::modules::auth::application::ports::incoming::use_cases::{AccountError, ProfileView};
use crate::modules::auth::application::ports::outgoing::ProfileChanges;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[schema(example = "partner")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub businesses_count: u64,
    pub saved_deals_count: u64,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            id: view.id.to_string(),
            name: view.name,
            email: view.email,
            role: view.role.to_string(),
            created_at: view.created_at,
            businesses_count: view.businesses_count,
            saved_deals_count: view.saved_deals_count,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `{ "user": { "name"?, "email"? } }`
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequestDto {
    pub user: ProfileFields,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordRequestDto {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeleteAccountRequestDto {
    pub password: String,
}

fn account_error_response(err: AccountError) -> HttpResponse {
    match err {
        AccountError::NotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        AccountError::IncorrectPassword => {
            ApiResponse::unauthorized("INCORRECT_PASSWORD", "Current password is incorrect")
        }
        AccountError::ValidationFailed(errors) => ApiResponse::unprocessable(errors.messages()),
        AccountError::EmailTaken => {
            ApiResponse::conflict("EMAIL_TAKEN", "Email has already been taken")
        }
        AccountError::Internal(ref e) => {
            error!(error = %e, "Account operation failed");
            ApiResponse::internal_error()
        }
    }
}

/// Own profile
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    tag = "users",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Profile with activity counts", body = inline(SuccessResponse<ProfileResponse>)),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
    )
)]
#[get("/api/v1/users/profile")]
pub async fn get_profile_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = current.0.id;
    if let Err(e) = authorize(&current.actor(), Action::Read, &Resource::Profile { owner: id }) {
        return access_denied(e);
    }

    match data.auth.get_profile.execute(id).await {
        Ok(view) => ApiResponse::success(ProfileResponse::from(view)),
        Err(e) => account_error_response(e),
    }
}

/// Update name and/or email
#[utoipa::path(
    patch,
    path = "/api/v1/users/profile",
    tag = "users",
    security(("BearerAuth" = [])),
    request_body = UpdateProfileRequestDto,
    responses(
        (status = 200, description = "Updated profile", body = inline(SuccessResponse<ProfileResponse>)),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
    )
)]
#[patch("/api/v1/users/profile")]
pub async fn update_profile_handler(
    current: CurrentIdentity,
    req: web::Json<UpdateProfileRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = current.0.id;
    if let Err(e) = authorize(&current.actor(), Action::Update, &Resource::Profile { owner: id }) {
        return access_denied(e);
    }

    let fields = req.into_inner().user;
    let changes = ProfileChanges {
        name: fields.name,
        email: fields.email,
    };

    match data.auth.update_profile.execute(id, changes).await {
        Ok(view) => {
            info!(user_id = %id, "Profile updated");
            ApiResponse::success(ProfileResponse::from(view))
        }
        Err(e) => account_error_response(e),
    }
}

/// Change password
#[utoipa::path(
    patch,
    path = "/api/v1/users/password",
    tag = "users",
    security(("BearerAuth" = [])),
    request_body = ChangePasswordRequestDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 401, description = "Current password is incorrect", body = ErrorResponse),
        (status = 422, description = "New password rejected", body = ErrorResponse),
    )
)]
#[patch("/api/v1/users/password")]
pub async fn change_password_handler(
    current: CurrentIdentity,
    req: web::Json<ChangePasswordRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = current.0.id;
    if let Err(e) = authorize(&current.actor(), Action::Update, &Resource::Profile { owner: id }) {
        return access_denied(e);
    }

    let dto = req.into_inner();
    match data
        .auth
        .change_password
        .execute(id, &dto.current_password, &dto.new_password)
        .await
    {
        Ok(()) => {
            info!(user_id = %id, "Password changed");
            ApiResponse::no_content()
        }
        Err(e) => account_error_response(e),
    }
}

/// Delete own account
///
/// Cascades to the account's listings, saved deals and white-label profile.
#[utoipa::path(
    delete,
    path = "/api/v1/users/account",
    tag = "users",
    security(("BearerAuth" = [])),
    request_body = DeleteAccountRequestDto,
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Password incorrect", body = ErrorResponse),
    )
)]
#[delete("/api/v1/users/account")]
pub async fn delete_account_handler(
    current: CurrentIdentity,
    req: web::Json<DeleteAccountRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = current.0.id;
    if let Err(e) = authorize(&current.actor(), Action::Delete, &Resource::Profile { owner: id }) {
        return access_denied(e);
    }

    match data.auth.delete_account.execute(id, &req.password).await {
        Ok(()) => {
            info!(user_id = %id, "Account deleted by its owner");
            ApiResponse::no_content()
        }
        Err(e) => account_error_response(e),
    }
}
