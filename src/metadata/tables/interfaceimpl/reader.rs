use crate::{
    metadata::tables::{InterfaceImplRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for InterfaceImplRaw {
    const TABLE: TableId = TableId::InterfaceImpl;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(InterfaceImplRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            class: row.value()?,
            interface: row.coded()?,
        })
    }
}
