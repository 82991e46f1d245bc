use crate::metadata::token::Token;

/// A row of the `PropertyMap` table (ECMA-335 II.22.35).
#[derive(Clone, Debug)]
pub struct PropertyMapRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `TypeDef` row owning the properties
    pub parent: u32,
    /// First row of the owned properties
    pub property_list: u32,
}
