pub mod businesses;
