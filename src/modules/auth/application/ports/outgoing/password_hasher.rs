use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed")]
    HashFailed,

    #[error("Stored password hash is unreadable")]
    CorruptHash,

    #[error("Background task failed")]
    TaskFailed,
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plain: &str) -> Result<String, HashError>;

    /// `Ok(false)` on mismatch; `Err` only when the check itself could not run.
    async fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError>;
}
