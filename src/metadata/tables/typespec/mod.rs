//! `TypeSpec` table (0x1B): constructed types such as generic instantiations and arrays.

mod raw;
mod reader;

pub use raw::*;
