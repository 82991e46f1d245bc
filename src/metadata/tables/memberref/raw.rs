use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `MemberRef` table (ECMA-335 II.22.25).
#[derive(Clone, Debug)]
pub struct MemberRefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `MemberRefParent` coded index of the declaring type
    pub class: CodedIndex,
    /// `#Strings` index of the member name
    pub name: u32,
    /// `#Blob` index of the member signature
    pub signature: u32,
}
