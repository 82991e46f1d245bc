//! `CustomAttribute` table (0x0C).
//!
//! Only the owner and the constructor are needed to recognise marker attributes; the value
//! blob is never decoded.

mod raw;
mod reader;

pub use raw::*;
