pub mod identity_query;
pub mod identity_repository;
pub mod password_hasher;
pub mod token_provider;

pub use identity_query::{ActivityCounts, IdentityQuery, IdentityQueryError, StoredCredentials};
pub use identity_repository::{
    IdentityRepository, IdentityRepositoryError, NewIdentity, ProfileChanges,
};
pub use password_hasher::{HashError, PasswordHasher};
pub use token_provider::{TokenClaims, TokenError, TokenProvider};
