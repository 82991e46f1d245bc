use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `InterfaceImpl` table (ECMA-335 II.22.23).
#[derive(Clone, Debug)]
pub struct InterfaceImplRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `TypeDef` row of the implementing type
    pub class: u32,
    /// `TypeDefOrRef` coded index of the implemented interface
    pub interface: CodedIndex,
}
