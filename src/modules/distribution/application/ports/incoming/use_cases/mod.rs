mod distribution;

pub use distribution::{
    DistributionDashboardUseCase, DistributionError, DistributionListingsUseCase,
    DistributionStatsUseCase, GetWhiteLabelUseCase, UpdateWhiteLabelUseCase,
};
