mod white_label_store;

pub use white_label_store::{WhiteLabelStore, WhiteLabelStoreError};
