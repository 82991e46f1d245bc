//! `Field` table (0x04).

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// `FieldAttributes` flags (ECMA-335 II.23.1.5)
pub mod FieldAttributes {
    /// Mask for the member access bits
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Field is static
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized, not written after construction
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is a compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Field does not need to be serialized
    pub const NOT_SERIALIZED: u32 = 0x0080;
    /// Name has special meaning
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// Implementation is forwarded through `PInvoke`
    pub const PINVOKE_IMPL: u32 = 0x2000;
    /// The runtime checks the name encoding
    pub const RTSPECIAL_NAME: u32 = 0x0400;
}
