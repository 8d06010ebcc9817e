use chrono::Utc;
use std::sync::Arc;

use crate::modules::analytics::application::domain::events::EventKind;
use crate::modules::analytics::application::ports::outgoing::EventStore;
use crate::modules::listing::application::domain::entities::ListingId;

/// Fail-open event recording for read paths.
///
/// The call is awaited so events land in order, but a failed insert is only
/// logged; the request that triggered it still succeeds.
#[derive(Clone)]
pub struct AnalyticsRecorder {
    store: Arc<dyn EventStore>,
}

impl AnalyticsRecorder {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, listing: ListingId, kind: EventKind) {
        if let Err(e) = self.store.record(listing, kind, Utc::now()).await {
            tracing::warn!(
                listing_id = %listing,
                event_type = kind.event_type(),
                error = %e,
                "analytics event dropped"
            );
        }
    }
}
