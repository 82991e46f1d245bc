use crate::{
    metadata::tables::{FieldRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for FieldRaw {
    const TABLE: TableId = TableId::Field;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(FieldRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            flags: row.value()?,
            name: row.value()?,
            signature: row.value()?,
        })
    }
}
