use crate::metadata::token::Token;

/// A row of the `TypeSpec` table (ECMA-335 II.22.39).
#[derive(Clone, Debug)]
pub struct TypeSpecRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `#Blob` index of the type signature
    pub signature: u32,
}
