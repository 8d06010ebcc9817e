use std::sync::Arc;

use crate::modules::distribution::application::ports::incoming::use_cases::{
    DistributionDashboardUseCase, DistributionListingsUseCase, DistributionStatsUseCase,
    GetWhiteLabelUseCase, UpdateWhiteLabelUseCase,
};

#[derive(Clone)]
pub struct DistributionUseCases {
    pub dashboard: Arc<dyn DistributionDashboardUseCase + Send + Sync>,
    pub listings: Arc<dyn DistributionListingsUseCase + Send + Sync>,
    pub stats: Arc<dyn DistributionStatsUseCase + Send + Sync>,
    pub get_white_label: Arc<dyn GetWhiteLabelUseCase + Send + Sync>,
    pub update_white_label: Arc<dyn UpdateWhiteLabelUseCase + Send + Sync>,
}
