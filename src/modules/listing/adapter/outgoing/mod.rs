mod listing_query_postgres;
mod listing_repository_postgres;
pub mod sea_orm_entity;

pub use listing_query_postgres::ListingQueryPostgres;
pub use listing_repository_postgres::ListingRepositoryPostgres;
