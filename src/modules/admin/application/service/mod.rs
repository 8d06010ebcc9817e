mod account_moderation_service;
mod admin_overview_service;

pub use account_moderation_service::AccountModerationService;
pub use admin_overview_service::AdminOverviewService;
