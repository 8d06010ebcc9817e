pub mod sea_orm_entity;
mod white_label_store_postgres;

pub use white_label_store_postgres::WhiteLabelStorePostgres;
