use super::login_user::AuthResponse;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::ports::incoming::use_cases::{SignupCommand, SignupError};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SignupRequestDto {
    #[schema(example = "Corner Bakery")]
    pub name: String,

    #[schema(example = "owner@example.com")]
    pub email: String,

    /// At least 6 characters
    #[schema(example = "secret1")]
    pub password: String,

    /// `user` (default), `partner` or `distribution`
    #[serde(default, alias = "user_type")]
    #[schema(example = "partner")]
    pub role: Option<String>,
}

/// Create an account
///
/// Registers a new identity and signs it in. Every invalid field is reported.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "auth",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<AuthResponse>)),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (
            status = 422,
            description = "Validation failed",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "VALIDATION_FAILED",
                    "message": "One or more fields are invalid",
                    "details": ["Name can't be blank", "Password is too short (minimum is 6 characters)"]
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/v1/auth/signup")]
pub async fn signup_user_handler(
    req: web::Json<SignupRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let command = SignupCommand {
        name: dto.name,
        email: dto.email,
        password: dto.password,
        role: dto.role,
    };

    match data.auth.signup.execute(command).await {
        Ok(session) => {
            info!(user_id = %session.identity.id, role = %session.identity.role, "Account created");
            ApiResponse::created(AuthResponse::new(session, "Account created successfully"))
        }

        Err(SignupError::ValidationFailed(errors)) => ApiResponse::unprocessable(errors.messages()),

        Err(SignupError::EmailTaken) => {
            ApiResponse::conflict("EMAIL_TAKEN", "Email has already been taken")
        }

        Err(SignupError::Internal(ref e)) => {
            error!(error = %e, "Signup failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::modules::auth::application::ports::incoming::use_cases::{
        AuthSession, SignupUseCase,
    };
    use crate::shared::validation::ValidationErrors;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::identity;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records the command it received and answers with a fixed outcome.
    struct RecordingSignup {
        received: Arc<Mutex<Option<SignupCommand>>>,
        outcome: Result<AuthSession, SignupError>,
    }

    #[async_trait]
    impl SignupUseCase for RecordingSignup {
        async fn execute(&self, command: SignupCommand) -> Result<AuthSession, SignupError> {
            *self.received.lock().unwrap() = Some(command);
            self.outcome.clone()
        }
    }

    fn signup_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Corner Bakery",
            "email": "owner@example.com",
            "password": "secret1",
            "user_type": "partner"
        })
    }

    #[actix_web::test]
    async fn test_signup_created_and_accepts_user_type_alias() {
        let received = Arc::new(Mutex::new(None));
        let app_state = TestAppStateBuilder::default()
            .with_signup(RecordingSignup {
                received: received.clone(),
                outcome: Ok(AuthSession {
                    token: "t".to_string(),
                    identity: identity(Role::Partner),
                }),
            })
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(signup_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(signup_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let command = received.lock().unwrap().take().unwrap();
        assert_eq!(command.role.as_deref(), Some("partner"));
        assert_eq!(command.name, "Corner Bakery");
    }

    #[actix_web::test]
    async fn test_signup_validation_lists_every_message() {
        let mut errors = ValidationErrors::new();
        errors.push("Name can't be blank");
        errors.push("User type cannot be admin");
        let app_state = TestAppStateBuilder::default()
            .with_signup(RecordingSignup {
                received: Arc::new(Mutex::new(None)),
                outcome: Err(SignupError::ValidationFailed(errors)),
            })
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(signup_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(signup_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 422);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(
            body["error"]["details"],
            serde_json::json!(["Name can't be blank", "User type cannot be admin"])
        );
    }

    #[actix_web::test]
    async fn test_signup_duplicate_email_conflicts() {
        let app_state = TestAppStateBuilder::default()
            .with_signup(RecordingSignup {
                received: Arc::new(Mutex::new(None)),
                outcome: Err(SignupError::EmailTaken),
            })
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(signup_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(signup_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn test_signup_malformed_json_is_bad_request() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(crate::shared::api::custom_json_config())
                .service(signup_user_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_JSON");
    }
}
