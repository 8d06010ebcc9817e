mod saved_deal_store_postgres;
pub mod sea_orm_entity;

pub use saved_deal_store_postgres::SavedDealStorePostgres;
