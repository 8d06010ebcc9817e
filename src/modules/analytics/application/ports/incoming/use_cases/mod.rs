mod analytics;

pub use analytics::{AnalyticsError, ListingAnalyticsUseCase, TrackClickUseCase};
