use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;

use crate::modules::access::{AccessError, Actor};
use crate::modules::auth::application::domain::entities::Identity;
use crate::modules::auth::application::helpers::SessionError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// A signed-in, non-suspended identity. Rejects the request otherwise.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl CurrentIdentity {
    pub fn actor(&self) -> Actor {
        self.0.actor()
    }
}

/// Guest-capable variant: no `Authorization` header means `None`, but a
/// header carrying a bad credential is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn actor(&self) -> Actor {
        self.0.as_ref().map(Identity::actor).unwrap_or(Actor::Guest)
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn session_error_response(err: SessionError) -> ActixError {
    let response = match err {
        SessionError::Unauthenticated | SessionError::IdentityNotFound => {
            ApiResponse::unauthorized("UNAUTHENTICATED", "Missing or invalid credential")
        }
        SessionError::AccountSuspended => {
            ApiResponse::forbidden("ACCOUNT_SUSPENDED", "Your account has been suspended")
        }
        SessionError::QueryFailed(msg) => {
            tracing::error!("Session lookup failed: {}", msg);
            ApiResponse::internal_error()
        }
    };
    create_api_error(response)
}

/// `None` when the header is absent. A header that is not a bearer
/// credential yields `Some("")`, which the resolver rejects.
pub fn bearer_credential(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?;
    let value = header.to_str().unwrap_or("");
    Some(value.strip_prefix("Bearer ").unwrap_or("").to_string())
}

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, ActixError> {
    req.app_data::<web::Data<AppState>>().cloned().ok_or_else(|| {
        tracing::error!("AppState is not registered on the application");
        create_api_error(ApiResponse::internal_error())
    })
}

impl FromRequest for CurrentIdentity {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = app_state(req);
        let credential = bearer_credential(req);

        Box::pin(async move {
            let state = state?;
            state
                .session_resolver
                .require(credential.as_deref())
                .await
                .map(CurrentIdentity)
                .map_err(session_error_response)
        })
    }
}

impl FromRequest for OptionalIdentity {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = app_state(req);
        let credential = bearer_credential(req);

        Box::pin(async move {
            let state = state?;
            state
                .session_resolver
                .resolve(credential.as_deref())
                .await
                .map(OptionalIdentity)
                .map_err(session_error_response)
        })
    }
}

pub fn access_denied(err: AccessError) -> HttpResponse {
    match err {
        AccessError::Forbidden => ApiResponse::forbidden("FORBIDDEN", &err.to_string()),
        AccessError::ForbiddenSelfAction => {
            ApiResponse::forbidden("FORBIDDEN_SELF_ACTION", &err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::{bearer, identity};
    use actix_web::{get, test, App, Responder};

    #[get("/whoami")]
    async fn whoami(current: CurrentIdentity) -> impl Responder {
        ApiResponse::success(current.0.email)
    }

    #[get("/maybe")]
    async fn maybe(current: OptionalIdentity) -> impl Responder {
        ApiResponse::success(current.0.is_some())
    }

    #[actix_web::test]
    async fn current_identity_resolves_a_valid_bearer() {
        let member = identity(Role::User);
        let app_state = TestAppStateBuilder::default()
            .with_identity(member.clone())
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(whoami)).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", bearer(&member)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], member.email);
    }

    #[actix_web::test]
    async fn missing_header_is_unauthenticated() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(app_state).service(whoami)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request())
            .await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
    }

    #[actix_web::test]
    async fn suspended_account_is_rejected_with_its_own_code() {
        let mut member = identity(Role::Partner);
        member.suspended = true;
        let app_state = TestAppStateBuilder::default()
            .with_identity(member.clone())
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(whoami)).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", bearer(&member)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "ACCOUNT_SUSPENDED");
    }

    #[actix_web::test]
    async fn optional_identity_allows_guests() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(app_state).service(maybe)).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/maybe").to_request()).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], false);
    }

    #[actix_web::test]
    async fn optional_identity_rejects_a_garbage_credential() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(app_state).service(maybe)).await;

        let req = test::TestRequest::get()
            .uri("/maybe")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn self_action_maps_to_dedicated_code() {
        let resp = access_denied(AccessError::ForbiddenSelfAction);
        assert_eq!(resp.status(), 403);
    }
}
