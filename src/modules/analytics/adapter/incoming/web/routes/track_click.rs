use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::OptionalIdentity;
use crate::modules::listing::application::domain::entities::ListingId;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::analytics_error_response;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct TrackClickRequestDto {
    /// `phone`, `email` or `website`; may be omitted
    #[schema(example = "phone")]
    pub click_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackClickResponse {
    #[schema(example = "Click tracked")]
    pub message: String,
}

/// Record a click
///
/// Open to guests. An unknown click type is rejected; a storage failure is
/// logged and the request still succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/businesses/{id}/track_click",
    tag = "analytics",
    params(("id" = Uuid, Path, description = "Listing id")),
    request_body(content = TrackClickRequestDto, description = "Optional body"),
    responses(
        (status = 200, description = "Click accepted", body = inline(SuccessResponse<TrackClickResponse>)),
        (status = 404, description = "No such listing", body = ErrorResponse),
        (status = 422, description = "Unknown click type", body = ErrorResponse),
    )
)]
#[post("/api/v1/businesses/{id}/track_click")]
pub async fn track_click_handler(
    viewer: OptionalIdentity,
    path: web::Path<Uuid>,
    body: Option<web::Json<TrackClickRequestDto>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = ListingId::from(path.into_inner());
    let click_type = body.and_then(|b| b.into_inner().click_type);

    match data
        .analytics
        .track_click
        .execute(viewer.actor(), id, click_type)
        .await
    {
        Ok(()) => ApiResponse::success(TrackClickResponse {
            message: "Click tracked".to_string(),
        }),
        Err(e) => analytics_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::analytics::application::domain::events::{ClickKind, EventFilter};
    use crate::modules::analytics::application::ports::outgoing::EventStore;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fakes::{InMemoryEvents, InMemoryListings};
    use crate::tests::support::fixtures::listing;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn guest_click_is_recorded_with_subtype() {
        let store = InMemoryListings::default();
        let target = store.insert(listing("Corner Bakery"));
        let events = InMemoryEvents::default();
        let app_state = TestAppStateBuilder::default()
            .with_listings(store)
            .with_events(events.clone())
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(track_click_handler)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/businesses/{}/track_click", target.id))
            .set_json(json!({ "click_type": "phone" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let phone = events
            .count(target.id, EventFilter::ClicksOf(ClickKind::Phone), None)
            .await
            .unwrap();
        assert_eq!(phone, 1);
    }

    #[actix_web::test]
    async fn bodyless_click_counts_as_plain_click() {
        let store = InMemoryListings::default();
        let target = store.insert(listing("Corner Bakery"));
        let events = InMemoryEvents::default();
        let app_state = TestAppStateBuilder::default()
            .with_listings(store)
            .with_events(events.clone())
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(track_click_handler)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/businesses/{}/track_click", target.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            events.count(target.id, EventFilter::Clicks, None).await.unwrap(),
            1
        );
    }

    #[actix_web::test]
    async fn unknown_click_type_is_unprocessable() {
        let store = InMemoryListings::default();
        let target = store.insert(listing("Corner Bakery"));
        let app_state = TestAppStateBuilder::default().with_listings(store).build();
        let app =
            test::init_service(App::new().app_data(app_state).service(track_click_handler)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/businesses/{}/track_click", target.id))
            .set_json(json!({ "click_type": "fax" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 422);
    }
}
