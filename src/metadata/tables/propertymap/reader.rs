use crate::{
    metadata::tables::{PropertyMapRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for PropertyMapRaw {
    const TABLE: TableId = TableId::PropertyMap;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(PropertyMapRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            parent: row.value()?,
            property_list: row.value()?,
        })
    }
}
