//! `InterfaceImpl` table (0x09): interfaces implemented by a type, sorted by class.

mod raw;
mod reader;

pub use raw::*;
