use async_trait::async_trait;
use serde::Serialize;

use crate::modules::auth::application::domain::entities::Identity;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account suspended")]
    AccountSuspended,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Token plus the identity it was issued for.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub identity: Identity,
}

//
// ──────────────────────────────────────────────────────────
// Use case
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait LoginUseCase: Send + Sync {
    async fn execute(&self, email: &str, password: &str) -> Result<AuthSession, LoginError>;
}
