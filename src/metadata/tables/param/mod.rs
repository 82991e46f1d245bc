//! `Param` table (0x08).
//!
//! Sequence 0 describes the return value; parameters are numbered from 1 in signature order.

mod raw;
mod reader;

pub use raw::*;
