//! `MethodSemantics` table (0x18): links property and event accessors to their owner.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `MethodSemanticsAttributes` flags (ECMA-335 II.23.1.12)
pub mod MethodSemanticsAttributes {
    /// Property setter
    pub const SETTER: u32 = 0x0001;
    /// Property getter
    pub const GETTER: u32 = 0x0002;
    /// Other accessor of a property or event
    pub const OTHER: u32 = 0x0004;
    /// Event add method
    pub const ADD_ON: u32 = 0x0008;
    /// Event remove method
    pub const REMOVE_ON: u32 = 0x0010;
    /// Event raise method
    pub const FIRE: u32 = 0x0020;
}
