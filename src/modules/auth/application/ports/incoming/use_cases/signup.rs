use async_trait::async_trait;

use super::login::AuthSession;
use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SignupError {
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error("Email has already been taken")]
    EmailTaken,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Raw signup input; the service validates every field and reports all
/// failures together.
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Wire name of the requested role; `None` means `user`.
    pub role: Option<String>,
}

#[async_trait]
pub trait SignupUseCase: Send + Sync {
    async fn execute(&self, command: SignupCommand) -> Result<AuthSession, SignupError>;
}
