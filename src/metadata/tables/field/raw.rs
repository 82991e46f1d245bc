use crate::metadata::token::Token;

/// A row of the `Field` table (ECMA-335 II.22.15).
#[derive(Clone, Debug)]
pub struct FieldRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `FieldAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the field name
    pub name: u32,
    /// `#Blob` index of the field signature
    pub signature: u32,
}
