use std::sync::Arc;

use crate::modules::admin::application::ports::incoming::use_cases::{
    AdminListingsUseCase, AdminUsersUseCase, DeleteUserUseCase, PendingApprovalsUseCase,
    PlatformStatsUseCase, SetAccountStateUseCase,
};

/// Listing moderation and deletion go through the listing module's use
/// cases; these cover the rest of the admin panel.
#[derive(Clone)]
pub struct AdminUseCases {
    pub stats: Arc<dyn PlatformStatsUseCase + Send + Sync>,
    pub users: Arc<dyn AdminUsersUseCase + Send + Sync>,
    pub listings: Arc<dyn AdminListingsUseCase + Send + Sync>,
    pub pending: Arc<dyn PendingApprovalsUseCase + Send + Sync>,
    pub set_account_state: Arc<dyn SetAccountStateUseCase + Send + Sync>,
    pub delete_user: Arc<dyn DeleteUserUseCase + Send + Sync>,
}
