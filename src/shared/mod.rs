pub mod api;
pub mod cache;
pub mod db_errors;
pub mod pagination;
pub mod validation;
