mod account_service;
mod login_service;
mod signup_service;

pub use account_service::AccountService;
pub use login_service::LoginService;
pub use signup_service::SignupService;
