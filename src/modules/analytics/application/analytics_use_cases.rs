use std::sync::Arc;

use crate::modules::analytics::application::ports::incoming::use_cases::{
    ListingAnalyticsUseCase, TrackClickUseCase,
};

#[derive(Clone)]
pub struct AnalyticsUseCases {
    pub track_click: Arc<dyn TrackClickUseCase + Send + Sync>,
    pub listing_summary: Arc<dyn ListingAnalyticsUseCase + Send + Sync>,
}
