//! `TypeRef` table (0x01): references to types defined in other modules or assemblies.

mod raw;
mod reader;

pub use raw::*;
