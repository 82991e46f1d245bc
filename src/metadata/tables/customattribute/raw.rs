use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `CustomAttribute` table (ECMA-335 II.22.10).
#[derive(Clone, Debug)]
pub struct CustomAttributeRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `HasCustomAttribute` coded index of the entity carrying the attribute
    pub parent: CodedIndex,
    /// `CustomAttributeType` coded index of the attribute constructor
    pub constructor: CodedIndex,
    /// `#Blob` index of the attribute value
    pub value: u32,
}
