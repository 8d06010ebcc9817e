mod listing_analytics_service;
mod track_click_service;

pub use listing_analytics_service::ListingAnalyticsService;
pub use track_click_service::TrackClickService;
