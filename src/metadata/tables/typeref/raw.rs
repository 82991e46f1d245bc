use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `TypeRef` table (ECMA-335 II.22.38).
#[derive(Clone, Debug)]
pub struct TypeRefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `ResolutionScope` coded index; a `TypeRef` scope denotes a nested type
    pub resolution_scope: CodedIndex,
    /// `#Strings` index of the type name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
}
