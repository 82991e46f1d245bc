use crate::{
    metadata::tables::{RowCursor, RowReadable, TableId, TableInfoRef, TypeSpecRaw},
    Result,
};

impl RowReadable for TypeSpecRaw {
    const TABLE: TableId = TableId::TypeSpec;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(TypeSpecRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            signature: row.value()?,
        })
    }
}
