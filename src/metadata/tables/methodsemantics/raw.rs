use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `MethodSemantics` table (ECMA-335 II.22.28).
#[derive(Clone, Debug)]
pub struct MethodSemanticsRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `MethodSemanticsAttributes` bitmask
    pub semantics: u32,
    /// `MethodDef` row of the accessor
    pub method: u32,
    /// `HasSemantics` coded index of the owning property or event
    pub association: CodedIndex,
}
