use crate::{
    metadata::tables::{ParamRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for ParamRaw {
    const TABLE: TableId = TableId::Param;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(ParamRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            flags: row.value()?,
            sequence: row.value()?,
            name: row.value()?,
        })
    }
}
