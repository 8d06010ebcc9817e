use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserId;

pub const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token encoding error: {0}")]
    Encoding(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    pub token_type: String,
}

impl TokenClaims {
    pub fn user_id(&self) -> UserId {
        UserId::from(self.sub)
    }

    pub fn is_access(&self) -> bool {
        self.token_type == ACCESS_TOKEN_TYPE
    }
}

/// Bearer credential primitive. Encoding and signature checks only; whether
/// the subject still exists is the session resolver's business.
pub trait TokenProvider: Send + Sync {
    fn issue_access_token(&self, user_id: UserId) -> Result<String, TokenError>;
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
