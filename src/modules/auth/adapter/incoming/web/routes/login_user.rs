use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::domain::entities::Identity;
use crate::modules::auth::application::ports::incoming::use_cases::{AuthSession, LoginError};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Login request from client
#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Email address
    #[schema(example = "owner@example.com")]
    pub email: String,

    /// Password
    #[schema(example = "secret1")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserSummary {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,

    #[schema(example = "Corner Bakery")]
    pub name: String,

    #[schema(example = "owner@example.com")]
    pub email: String,

    /// One of `user`, `partner`, `distribution`, `admin`
    #[schema(example = "partner")]
    pub role: String,
}

impl From<&Identity> for UserSummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            role: identity.role.to_string(),
        }
    }
}

/// Body returned by login and signup.
#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserSummary,

    /// HS256 access token, sent back as `Authorization: Bearer <token>`
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,

    #[schema(example = "Logged in successfully")]
    pub message: String,
}

impl AuthResponse {
    pub fn new(session: AuthSession, message: &str) -> Self {
        Self {
            user: UserSummary::from(&session.identity),
            token: session.token,
            message: message.to_string(),
        }
    }
}

/// User login
///
/// Exchanges email and password for an access token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<AuthResponse>)),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_CREDENTIALS",
                    "message": "Invalid email or password"
                }
            })
        ),
        (status = 403, description = "Account suspended", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    match data.auth.login.execute(&dto.email, &dto.password).await {
        Ok(session) => {
            info!(user_id = %session.identity.id, "User logged in");
            ApiResponse::success(AuthResponse::new(session, "Logged in successfully"))
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(LoginError::AccountSuspended) => {
            warn!("Login refused: account suspended");
            ApiResponse::forbidden("ACCOUNT_SUSPENDED", "Your account has been suspended")
        }

        Err(LoginError::Internal(ref e)) => {
            error!(error = %e, "Login failed");
            ApiResponse::internal_error()
        }
    }
}
