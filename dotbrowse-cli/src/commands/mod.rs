pub mod common;
pub mod summary;
pub mod tree;
