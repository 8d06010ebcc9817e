pub mod dashboard;
pub mod white_label;
