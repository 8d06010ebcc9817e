pub mod white_labels;
