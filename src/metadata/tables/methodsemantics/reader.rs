use crate::{
    metadata::tables::{MethodSemanticsRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for MethodSemanticsRaw {
    const TABLE: TableId = TableId::MethodSemantics;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(MethodSemanticsRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            semantics: row.value()?,
            method: row.value()?,
            association: row.coded()?,
        })
    }
}
