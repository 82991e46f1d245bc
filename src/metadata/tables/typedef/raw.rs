use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `TypeDef` table (ECMA-335 II.22.37).
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `TypeAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the type name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// `TypeDefOrRef` coded index of the base type, null for interfaces and `System.Object`
    pub extends: CodedIndex,
    /// First row of this type's fields
    pub field_list: u32,
    /// First row of this type's methods
    pub method_list: u32,
}
