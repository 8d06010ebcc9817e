use std::sync::Arc;

use crate::modules::auth::application::ports::incoming::use_cases::{
    ChangePasswordUseCase, DeleteAccountUseCase, GetProfileUseCase, LoginUseCase, SignupUseCase,
    UpdateProfileUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    pub login: Arc<dyn LoginUseCase + Send + Sync>,
    pub signup: Arc<dyn SignupUseCase + Send + Sync>,
    pub get_profile: Arc<dyn GetProfileUseCase + Send + Sync>,
    pub update_profile: Arc<dyn UpdateProfileUseCase + Send + Sync>,
    pub change_password: Arc<dyn ChangePasswordUseCase + Send + Sync>,
    pub delete_account: Arc<dyn DeleteAccountUseCase + Send + Sync>,
}
