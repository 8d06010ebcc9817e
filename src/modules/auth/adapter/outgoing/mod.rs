mod identity_query_postgres;
mod identity_repository_postgres;
pub mod jwt;
pub mod sea_orm_entity;
pub mod security;

pub use identity_query_postgres::IdentityQueryPostgres;
pub use identity_repository_postgres::IdentityRepositoryPostgres;
