//! `PropertyMap` table (0x15): assigns ranges of the `Property` table to types.

mod raw;
mod reader;

pub use raw::*;
