mod admin;

pub use admin::{
    AdminError, AdminListingsUseCase, AdminUsersUseCase, DeleteUserUseCase,
    PendingApprovalsUseCase, PlatformStatsUseCase, SetAccountStateUseCase,
};
