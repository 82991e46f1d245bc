use crate::metadata::token::Token;

/// A row of the `MethodDef` table (ECMA-335 II.22.26).
#[derive(Clone, Debug)]
pub struct MethodDefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// RVA of the method body, 0 for abstract and runtime methods
    pub rva: u32,
    /// `MethodImplAttributes` bitmask
    pub impl_flags: u32,
    /// `MethodAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the method name
    pub name: u32,
    /// `#Blob` index of the method signature
    pub signature: u32,
    /// First row of this method's parameters
    pub param_list: u32,
}
