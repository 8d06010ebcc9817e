pub mod account;
pub mod current_user;
pub mod login_user;
pub mod logout_user;
pub mod signup_user;

pub use account::{
    change_password_handler, delete_account_handler, get_profile_handler,
    update_profile_handler, ChangePasswordRequestDto, DeleteAccountRequestDto, ProfileResponse,
    UpdateProfileRequestDto,
};
pub use current_user::current_user_handler;
pub use login_user::{login_user_handler, AuthResponse, LoginRequestDto, UserSummary};
pub use logout_user::{logout_user_handler, LogoutResponse};
pub use signup_user::{signup_user_handler, SignupRequestDto};
