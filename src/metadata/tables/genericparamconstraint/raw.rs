use crate::metadata::{tables::CodedIndex, token::Token};

/// A row of the `GenericParamConstraint` table (ECMA-335 II.22.21).
#[derive(Clone, Debug)]
pub struct GenericParamConstraintRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row inside the table
    pub offset: usize,
    /// `GenericParam` row being constrained
    pub owner: u32,
    /// `TypeDefOrRef` coded index of the constraint type
    pub constraint: CodedIndex,
}
