pub mod entities;
pub mod password_rules;
