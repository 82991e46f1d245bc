//! `TypeDef` table (0x02): the types defined in this module.
//!
//! Members are assigned by ranges: a type owns the fields from its `field_list` up to the
//! `field_list` of the next row (or the end of the `Field` table), and likewise for methods.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `TypeAttributes` flags (ECMA-335 II.23.1.15)
pub mod TypeAttributes {
    /// Mask for the visibility bits
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Top-level type, not visible outside the assembly
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Top-level type, visible everywhere
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Nested type with public visibility
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Nested type with private visibility
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;
    /// Nested type with family visibility
    pub const NESTED_FAMILY: u32 = 0x0000_0004;
    /// Nested type with assembly visibility
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;
    /// Nested type with family-and-assembly visibility
    pub const NESTED_FAM_AND_ASSEM: u32 = 0x0000_0006;
    /// Nested type with family-or-assembly visibility
    pub const NESTED_FAM_OR_ASSEM: u32 = 0x0000_0007;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Type is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Type cannot be derived from
    pub const SEALED: u32 = 0x0000_0100;
    /// Name has special meaning
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
}
