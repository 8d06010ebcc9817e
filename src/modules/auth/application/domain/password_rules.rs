use crate::shared::validation::ValidationErrors;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Length is counted in characters, not bytes.
pub fn check_password(errors: &mut ValidationErrors, password: &str) {
    let len = password.chars().count();
    errors.check(
        len < MIN_PASSWORD_LEN,
        "Password is too short (minimum is 6 characters)",
    );
    errors.check(
        len > MAX_PASSWORD_LEN,
        "Password is too long (maximum is 128 characters)",
    );
}
