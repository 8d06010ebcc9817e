use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::auth::application::ports::incoming::use_cases::{
    AuthSession, LoginError, LoginUseCase,
};
use crate::modules::auth::application::ports::outgoing::{
    IdentityQuery, PasswordHasher, TokenProvider,
};

pub struct LoginService<Q>
where
    Q: IdentityQuery,
{
    identities: Q,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider>,
}

impl<Q> LoginService<Q>
where
    Q: IdentityQuery,
{
    pub fn new(identities: Q, hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            identities,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<Q> LoginUseCase for LoginService<Q>
where
    Q: IdentityQuery + Send + Sync,
{
    async fn execute(&self, email: &str, password: &str) -> Result<AuthSession, LoginError> {
        let email = email.trim().to_lowercase();

        let stored = self
            .identities
            .find_credentials_by_email(&email)
            .await
            .map_err(|e| LoginError::Internal(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        let matches = self
            .hasher
            .verify(password, &stored.password_hash)
            .await
            .map_err(|e| LoginError::Internal(e.to_string()))?;

        if !matches {
            return Err(LoginError::InvalidCredentials);
        }

        // Checked only after the password, so suspension does not leak
        // which emails are registered.
        if stored.identity.is_suspended() {
            return Err(LoginError::AccountSuspended);
        }

        let token = self
            .tokens
            .issue_access_token(stored.identity.id)
            .map_err(|e| LoginError::Internal(e.to_string()))?;

        tracing::info!("Identity {} logged in", stored.identity.id);

        Ok(AuthSession {
            token,
            identity: stored.identity,
        })
    }
}
