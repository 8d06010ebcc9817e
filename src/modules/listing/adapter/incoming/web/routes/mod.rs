pub mod get_listing;
mod listing_dto;
pub mod search_listings;
pub mod write_listing;

pub use get_listing::{get_listing_handler, my_listings_handler};
pub use listing_dto::{
    listing_error_response, listing_responses, ListingFields, ListingOwnerResponse,
    ListingPageResponse, ListingRequestDto, ListingResponse,
};
pub use search_listings::{
    autocomplete_handler, search_listings_handler, AutocompleteParams, SearchListingsParams,
    SuggestionResponse,
};
pub use write_listing::{create_listing_handler, delete_listing_handler, update_listing_handler};
