use crate::{
    metadata::tables::{GenericParamRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for GenericParamRaw {
    const TABLE: TableId = TableId::GenericParam;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(GenericParamRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            number: row.value()?,
            flags: row.value()?,
            owner: row.coded()?,
            name: row.value()?,
        })
    }
}
