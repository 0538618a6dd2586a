pub mod action_items;
pub mod colors;
pub mod progress;
pub mod tree_ops;
pub mod views;
