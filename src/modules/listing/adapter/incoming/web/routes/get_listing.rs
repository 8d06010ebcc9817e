use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::{CurrentIdentity, OptionalIdentity};
use crate::modules::listing::application::domain::entities::ListingId;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use uuid::Uuid;

use super::listing_dto::{listing_error_response, listing_responses, ListingResponse};

/// Listing detail
///
/// Records a view event. A failure to record never fails the read.
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{id}",
    tag = "businesses",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing found", body = inline(SuccessResponse<ListingResponse>)),
        (status = 404, description = "No such listing", body = ErrorResponse),
    )
)]
#[get("/api/v1/businesses/{id}")]
pub async fn get_listing_handler(
    viewer: OptionalIdentity,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = ListingId::from(path.into_inner());

    match data.listing.get.execute(viewer.actor(), id).await {
        Ok(listing) => ApiResponse::success(ListingResponse::from(listing)),
        Err(e) => listing_error_response(e),
    }
}

/// Own listings
#[utoipa::path(
    get,
    path = "/api/v1/businesses/my",
    tag = "businesses",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "The caller's listings, newest first", body = inline(SuccessResponse<Vec<ListingResponse>>)),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Role cannot own listings", body = ErrorResponse),
    )
)]
#[get("/api/v1/businesses/my")]
pub async fn my_listings_handler(
    current: CurrentIdentity,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.listing.mine.execute(current.actor()).await {
        Ok(listings) => ApiResponse::success(listing_responses(listings)),
        Err(e) => listing_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::analytics::application::domain::events::EventFilter;
    use crate::modules::analytics::application::ports::outgoing::EventStore;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fakes::{InMemoryEvents, InMemoryListings};
    use crate::tests::support::fixtures::{bearer, identity, listing, listing_owned_by};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn guest_read_records_a_view() {
        let store = InMemoryListings::default();
        let target = store.insert(listing("Corner Bakery"));
        let events = InMemoryEvents::default();
        let app_state = TestAppStateBuilder::default()
            .with_listings(store)
            .with_events(events.clone())
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(get_listing_handler)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/businesses/{}", target.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["name"], "Corner Bakery");
        assert_eq!(
            events.count(target.id, EventFilter::Views, None).await.unwrap(),
            1
        );
    }

    #[actix_web::test]
    async fn unknown_listing_is_404() {
        let app_state = TestAppStateBuilder::default().build();
        let app =
            test::init_service(App::new().app_data(app_state).service(get_listing_handler)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/businesses/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "BUSINESS_NOT_FOUND");
    }

    #[actix_web::test]
    async fn invalid_credential_on_guest_route_is_rejected() {
        let store = InMemoryListings::default();
        let target = store.insert(listing("Corner Bakery"));
        let app_state = TestAppStateBuilder::default().with_listings(store).build();
        let app =
            test::init_service(App::new().app_data(app_state).service(get_listing_handler)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/businesses/{}", target.id))
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn my_listings_lists_only_own() {
        let partner = identity(Role::Partner);
        let store = InMemoryListings::default();
        store.insert(listing_owned_by("Mine", partner.id));
        store.insert(listing("Someone else's"));

        let app_state = TestAppStateBuilder::default()
            .with_identity(partner.clone())
            .with_listings(store)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(my_listings_handler)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/businesses/my")
            .insert_header(("Authorization", bearer(&partner)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let items = body["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Mine");
    }

    #[actix_web::test]
    async fn plain_users_have_no_listings_route() {
        let user = identity(Role::User);
        let app_state = TestAppStateBuilder::default()
            .with_identity(user.clone())
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(my_listings_handler)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/businesses/my")
            .insert_header(("Authorization", bearer(&user)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
    }
}
