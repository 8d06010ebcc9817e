mod event_store_postgres;
pub mod sea_orm_entity;

pub use event_store_postgres::EventStorePostgres;
