use crate::{
    metadata::tables::{CustomAttributeRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for CustomAttributeRaw {
    const TABLE: TableId = TableId::CustomAttribute;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(CustomAttributeRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            parent: row.coded()?,
            constructor: row.coded()?,
            value: row.value()?,
        })
    }
}
