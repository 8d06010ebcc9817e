use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::application::domain::overview::{
    AccountCommand, ManagedUser, UserFilter,
};
use crate::modules::auth::adapter::incoming::web::extractors::CurrentIdentity;
use crate::modules::auth::application::domain::entities::{Role, UserId};
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{Page, PageRequest, Pagination};
use crate::AppState;
use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{admin_error_response, AdminMessage};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminUsersParams {
    /// Case-insensitive match on name or email
    pub search: Option<String>,
    /// `user`, `partner`, `distribution` or `admin`
    #[serde(alias = "user_type")]
    pub role: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl AdminUsersParams {
    fn to_filter(&self) -> Result<UserFilter, HttpResponse> {
        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Role>().map_err(|_| {
                ApiResponse::unprocessable(&["Role is not included in the list".to_string()])
            })?),
        };
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(UserFilter { search, role })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUserResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[schema(example = "partner")]
    pub user_type: String,
    pub created_at: DateTime<Utc>,
    pub businesses_count: u64,
    pub saved_deals_count: u64,
    pub suspended: bool,
    pub suspended_at: Option<DateTime<Utc>>,
}

impl From<ManagedUser> for AdminUserResponse {
    fn from(user: ManagedUser) -> Self {
        let identity = user.identity;
        Self {
            id: identity.id.to_string(),
            name: identity.name,
            email: identity.email,
            user_type: identity.role.to_string(),
            created_at: identity.created_at,
            businesses_count: user.listing_count,
            saved_deals_count: user.saved_deal_count,
            suspended: identity.suspended,
            suspended_at: identity.suspended_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUserPageResponse {
    pub users: Vec<AdminUserResponse>,
    pub pagination: Pagination,
}

impl From<Page<ManagedUser>> for AdminUserPageResponse {
    fn from(page: Page<ManagedUser>) -> Self {
        Self {
            users: page.items.into_iter().map(AdminUserResponse::from).collect(),
            pagination: page.pagination,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountStateResponse {
    #[schema(example = "User suspended successfully")]
    pub message: String,
    pub user: AdminUserResponse,
}

/// List accounts
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(AdminUsersParams),
    responses(
        (status = 200, description = "One page of accounts, newest first", body = inline(SuccessResponse<AdminUserPageResponse>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Unknown role filter", body = ErrorResponse),
    )
)]
#[get("/api/v1/admin/users")]
pub async fn admin_users_handler(
    current: CurrentIdentity,
    params: web::Query<AdminUsersParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let filter = match params.to_filter() {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let page = PageRequest::new(params.page, params.per_page);

    match data.admin.users.execute(current.actor(), filter, page).await {
        Ok(page) => ApiResponse::success(AdminUserPageResponse::from(page)),
        Err(e) => admin_error_response(e),
    }
}

async fn set_account_state(
    current: CurrentIdentity,
    target: Uuid,
    command: AccountCommand,
    data: web::Data<AppState>,
) -> HttpResponse {
    let target = UserId::from(target);

    match data
        .admin
        .set_account_state
        .execute(current.actor(), target, command)
        .await
    {
        Ok(user) => {
            let message = match command {
                AccountCommand::Suspend => "User suspended successfully",
                AccountCommand::Activate => "User activated successfully",
            };
            info!(target_id = %target, admin_id = %current.0.id, ?command, "Account state changed");
            ApiResponse::success(AccountStateResponse {
                message: message.to_string(),
                user: AdminUserResponse::from(user),
            })
        }
        Err(e) => admin_error_response(e),
    }
}

/// Suspend an account
///
/// Suspended accounts keep their data but every authenticated request is
/// refused with `ACCOUNT_SUSPENDED`.
#[utoipa::path(
    patch,
    path = "/api/v1/admin/users/{id}/suspend",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account suspended", body = inline(SuccessResponse<AccountStateResponse>)),
        (status = 403, description = "Not an admin, or suspending yourself", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse),
    )
)]
#[patch("/api/v1/admin/users/{id}/suspend")]
pub async fn suspend_user_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    set_account_state(current, path.into_inner(), AccountCommand::Suspend, data).await
}

/// Reactivate an account
#[utoipa::path(
    patch,
    path = "/api/v1/admin/users/{id}/activate",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account active", body = inline(SuccessResponse<AccountStateResponse>)),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse),
    )
)]
#[patch("/api/v1/admin/users/{id}/activate")]
pub async fn activate_user_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    set_account_state(current, path.into_inner(), AccountCommand::Activate, data).await
}

/// Delete an account
///
/// Removes the account together with its listings, saved deals and white
/// label profile.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    tag = "admin",
    security(("BearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account deleted", body = inline(SuccessResponse<AdminMessage>)),
        (status = 403, description = "Not an admin, or deleting yourself", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse),
    )
)]
#[delete("/api/v1/admin/users/{id}")]
pub async fn delete_user_handler(
    current: CurrentIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let target = UserId::from(path.into_inner());

    match data.admin.delete_user.execute(current.actor(), target).await {
        Ok(()) => {
            info!(target_id = %target, admin_id = %current.0.id, "Account deleted by admin");
            ApiResponse::success(AdminMessage::new("User deleted successfully"))
        }
        Err(e) => admin_error_response(e),
    }
}
