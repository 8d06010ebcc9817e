mod get_listing_service;
mod listing_command_service;
mod listing_search_service;
mod moderation_service;

pub use get_listing_service::GetListingService;
pub use listing_command_service::ListingCommandService;
pub use listing_search_service::ListingSearchService;
pub use moderation_service::ModerationService;
