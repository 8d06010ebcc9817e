use std::sync::Arc;

use crate::modules::auth::application::domain::entities::Identity;
use crate::modules::auth::application::ports::outgoing::{IdentityQuery, TokenProvider};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Missing, malformed or expired credential")]
    Unauthenticated,

    #[error("Credential refers to an unknown identity")]
    IdentityNotFound,

    #[error("Account suspended")]
    AccountSuspended,

    #[error("Identity lookup failed: {0}")]
    QueryFailed(String),
}

/// Turns a bearer credential into an [`Identity`].
///
/// Order of checks: credential shape, signature/expiry, identity lookup,
/// suspension. A suspended account is rejected even with a perfectly valid
/// token.
#[derive(Clone)]
pub struct SessionResolver {
    tokens: Arc<dyn TokenProvider>,
    identities: Arc<dyn IdentityQuery>,
}

impl SessionResolver {
    pub fn new(tokens: Arc<dyn TokenProvider>, identities: Arc<dyn IdentityQuery>) -> Self {
        Self { tokens, identities }
    }

    /// `Ok(None)` means guest. A present but unusable credential is an error,
    /// never a silent downgrade to guest.
    pub async fn resolve(&self, credential: Option<&str>) -> Result<Option<Identity>, SessionError> {
        match credential {
            None => Ok(None),
            Some(token) => self.require(Some(token)).await.map(Some),
        }
    }

    pub async fn require(&self, credential: Option<&str>) -> Result<Identity, SessionError> {
        let token = credential
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::Unauthenticated)?;

        let claims = self.tokens.verify_token(token).map_err(|e| {
            tracing::debug!("Rejected bearer credential: {}", e);
            SessionError::Unauthenticated
        })?;

        if !claims.is_access() {
            return Err(SessionError::Unauthenticated);
        }

        let identity = self
            .identities
            .find_by_id(claims.user_id())
            .await
            .map_err(|e| SessionError::QueryFailed(e.to_string()))?
            .ok_or(SessionError::IdentityNotFound)?;

        if identity.is_suspended() {
            tracing::info!("Suspended account {} attempted to authenticate", identity.id);
            return Err(SessionError::AccountSuspended);
        }

        Ok(identity)
    }
}
