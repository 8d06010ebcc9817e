mod dashboard_service;
mod white_label_service;

pub use dashboard_service::DistributionDashboardService;
pub use white_label_service::WhiteLabelService;
