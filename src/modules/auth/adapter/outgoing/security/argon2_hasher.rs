use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use rand_core::OsRng;

use crate::modules::auth::application::ports::outgoing::{HashError, PasswordHasher};

/// Argon2id hasher. Work runs on the blocking pool so request tasks are never
/// stalled by the deliberately slow hash.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

const DEFAULT_MEMORY_KIB: u32 = 4 * 1024;
const DEFAULT_ITERATIONS: u32 = 3;
const DEFAULT_PARALLELISM: u32 = 1;

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::new(DEFAULT_MEMORY_KIB, DEFAULT_ITERATIONS, DEFAULT_PARALLELISM, None)
                .unwrap_or_default(),
        }
    }
}

impl Argon2Hasher {
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, argon2::Error> {
        let params = Params::new(memory_kib, iterations, parallelism, None)?;
        Ok(Self { params })
    }

    /// Reads `ARGON2_MEMORY_KIB`, `ARGON2_ITERATIONS`, `ARGON2_PARALLELISM`.
    pub fn from_env() -> Self {
        fn read(key: &str, default: u32) -> u32 {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        let memory_kib = read("ARGON2_MEMORY_KIB", DEFAULT_MEMORY_KIB);
        let iterations = read("ARGON2_ITERATIONS", DEFAULT_ITERATIONS);
        let parallelism = read("ARGON2_PARALLELISM", DEFAULT_PARALLELISM);

        Self::with_params(memory_kib, iterations, parallelism)
            .unwrap_or_else(|e| panic!("Invalid Argon2 parameters: {}", e))
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, plain: &str) -> Result<String, HashError> {
        let plain = plain.to_string();
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
            let salt = SaltString::generate(&mut OsRng);

            argon2
                .hash_password(plain.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|_| HashError::HashFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }

    async fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError> {
        let plain = plain.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || {
            // Parameters come from the PHC string, not from self.
            let parsed = PasswordHash::new(&hash).map_err(|_| HashError::CorruptHash)?;

            match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(PasswordHashError::Password) => Ok(false),
                Err(_) => Err(HashError::CorruptHash),
            }
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> Argon2Hasher {
        Argon2Hasher::with_params(1024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = fast();
        let hash = hasher.hash("secret1").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("secret1", &hash).await.unwrap());
        assert!(!hasher.verify("secret2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let hasher = fast();
        let a = hasher.hash("secret1").await.unwrap();
        let b = hasher.hash("secret1").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn unreadable_hash_is_an_error_not_a_mismatch() {
        let result = fast().verify("secret1", "not-a-phc-string").await;
        assert_eq!(result, Err(HashError::CorruptHash));
    }

    #[test]
    fn rejects_impossible_params() {
        assert!(Argon2Hasher::with_params(0, 0, 0).is_err());
    }
}
