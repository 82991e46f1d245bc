use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `GenericParam` table (ECMA-335 II.22.20).
#[derive(Clone, Debug)]
pub struct GenericParamRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// 0-based position in the owner's parameter list
    pub number: u32,
    /// `GenericParamAttributes` bitmask
    pub flags: u32,
    /// `TypeOrMethodDef` coded index of the owner
    pub owner: CodedIndex,
    /// `#Strings` index of the parameter name
    pub name: u32,
}
