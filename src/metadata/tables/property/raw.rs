use crate::metadata::token::Token;

/// A row of the `Property` table (ECMA-335 II.22.34).
#[derive(Clone, Debug)]
pub struct PropertyRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `PropertyAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the property name
    pub name: u32,
    /// `#Blob` index of the property signature
    pub signature: u32,
}
