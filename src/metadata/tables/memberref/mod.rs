//! `MemberRef` table (0x0A): references to fields and methods, e.g. attribute constructors.

mod raw;
mod reader;

pub use raw::*;
