//! `NestedClass` table (0x29): maps nested types to their enclosing type.

mod raw;
mod reader;

pub use raw::*;
