pub mod analytics_use_cases;
pub mod domain;
pub mod helpers;
pub mod ports;
pub mod service;
