//! `MethodDef` table (0x06).
//!
//! Like `TypeDef`, a method owns a range of the `Param` table starting at its `param_list`.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `MethodAttributes` flags (ECMA-335 II.23.1.10)
pub mod MethodAttributes {
    /// Mask for the member access bits
    pub const MEMBER_ACCESS_MASK: u32 = 0x0007;
    /// Method is static
    pub const STATIC: u32 = 0x0010;
    /// Method cannot be overridden
    pub const FINAL: u32 = 0x0020;
    /// Method is virtual
    pub const VIRTUAL: u32 = 0x0040;
    /// Method hides by name and signature
    pub const HIDE_BY_SIG: u32 = 0x0080;
    /// Method always gets a new vtable slot
    pub const NEW_SLOT: u32 = 0x0100;
    /// Method has no implementation
    pub const ABSTRACT: u32 = 0x0400;
    /// Name has special meaning, e.g. property accessors
    pub const SPECIAL_NAME: u32 = 0x0800;
    /// The runtime checks the name encoding, e.g. constructors
    pub const RTSPECIAL_NAME: u32 = 0x1000;
}
