use crate::metadata::token::Token;

/// A row of the `Param` table (ECMA-335 II.22.33).
#[derive(Clone, Debug)]
pub struct ParamRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `ParamAttributes` bitmask
    pub flags: u32,
    /// Position in the signature, 0 for the return value
    pub sequence: u32,
    /// `#Strings` index of the parameter name
    pub name: u32,
}
