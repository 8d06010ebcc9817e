pub mod ports;
pub mod saved_deal_use_cases;
pub mod service;
