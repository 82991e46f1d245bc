//! `GenericParam` table (0x2A): type parameters of generic types and methods.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `GenericParamAttributes` flags (ECMA-335 II.23.1.7)
pub mod GenericParamAttributes {
    /// Mask for the variance bits
    pub const VARIANCE_MASK: u32 = 0x0003;
    /// Covariant (`out T`)
    pub const COVARIANT: u32 = 0x0001;
    /// Contravariant (`in T`)
    pub const CONTRAVARIANT: u32 = 0x0002;
    /// Mask for the special constraint bits
    pub const SPECIAL_CONSTRAINT_MASK: u32 = 0x001C;
    /// `class` constraint
    pub const REFERENCE_TYPE_CONSTRAINT: u32 = 0x0004;
    /// `struct` constraint
    pub const NOT_NULLABLE_VALUE_TYPE_CONSTRAINT: u32 = 0x0008;
    /// `new()` constraint
    pub const DEFAULT_CONSTRUCTOR_CONSTRAINT: u32 = 0x0010;
}
