use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::listing::application::domain::search::{
    ListingFilter, ListingSearch, Suggestion,
};
use crate::shared::api::ApiResponse;
use crate::shared::pagination::PageRequest;
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::listing_dto::{listing_error_response, ListingPageResponse};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchListingsParams {
    /// Free text matched against name, description, category, address and deal
    pub search: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// `true` keeps featured listings only
    pub featured: Option<String>,
    /// `true` keeps listings with deals only
    pub deals: Option<String>,
    /// Caps the ordered match set before pagination
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn flag(raw: &Option<String>) -> bool {
    raw.as_deref() == Some("true")
}

impl SearchListingsParams {
    pub fn to_search(&self) -> ListingSearch {
        ListingSearch::new(
            ListingFilter::new(
                self.search.as_deref(),
                self.category.as_deref(),
                flag(&self.featured),
                flag(&self.deals),
                self.limit,
            ),
            PageRequest::new(self.page, self.per_page),
        )
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AutocompleteParams {
    /// At least two characters; shorter queries answer `[]`
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestionResponse {
    #[schema(example = "Corner Bakery")]
    pub name: String,
    #[schema(example = "Food")]
    pub category: String,
    /// Last comma-separated segment of the address
    #[schema(example = "Springfield")]
    pub location: Option<String>,
}

impl From<Suggestion> for SuggestionResponse {
    fn from(s: Suggestion) -> Self {
        Self {
            name: s.name,
            category: s.category,
            location: s.location,
        }
    }
}

/// Search listings
///
/// Filtered, ranked and paginated listing search. Results are cached per
/// filter combination until the next listing write.
#[utoipa::path(
    get,
    path = "/api/v1/businesses",
    tag = "businesses",
    params(SearchListingsParams),
    responses(
        (status = 200, description = "One page of listings", body = inline(SuccessResponse<ListingPageResponse>)),
        (status = 400, description = "Malformed query string", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/v1/businesses")]
pub async fn search_listings_handler(
    params: web::Query<SearchListingsParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.listing.search.execute(params.to_search()).await {
        Ok(page) => ApiResponse::success(ListingPageResponse::from(page)),
        Err(e) => listing_error_response(e),
    }
}

/// Autocomplete listing names
#[utoipa::path(
    get,
    path = "/api/v1/businesses/autocomplete",
    tag = "businesses",
    params(AutocompleteParams),
    responses(
        (status = 200, description = "Up to ten suggestions", body = inline(SuccessResponse<Vec<SuggestionResponse>>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/v1/businesses/autocomplete")]
pub async fn autocomplete_handler(
    params: web::Query<AutocompleteParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = params.query.as_deref().unwrap_or("");

    match data.listing.autocomplete.execute(query).await {
        Ok(suggestions) => ApiResponse::success(
            suggestions
                .into_iter()
                .map(SuggestionResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => listing_error_response(e),
    }
}
