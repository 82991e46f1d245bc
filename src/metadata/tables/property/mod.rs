//! `Property` table (0x17).

mod raw;
mod reader;

pub use raw::*;
