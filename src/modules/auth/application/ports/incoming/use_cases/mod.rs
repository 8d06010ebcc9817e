mod account;
mod login;
mod signup;

pub use account::{
    AccountError, ChangePasswordUseCase, DeleteAccountUseCase, GetProfileUseCase, ProfileView,
    UpdateProfileUseCase,
};
pub use login::{AuthSession, LoginError, LoginUseCase};
pub use signup::{SignupCommand, SignupError, SignupUseCase};
