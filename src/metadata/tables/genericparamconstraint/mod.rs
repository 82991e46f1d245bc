//! `GenericParamConstraint` table (0x2C): type constraints of generic parameters.

mod raw;
mod reader;

pub use raw::*;
