use crate::{
    metadata::tables::{NestedClassRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for NestedClassRaw {
    const TABLE: TableId = TableId::NestedClass;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(NestedClassRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            nested_class: row.value()?,
            enclosing_class: row.value()?,
        })
    }
}
