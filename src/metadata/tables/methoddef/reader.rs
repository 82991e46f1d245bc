use crate::{
    metadata::tables::{MethodDefRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for MethodDefRaw {
    const TABLE: TableId = TableId::MethodDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(MethodDefRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            rva: row.value()?,
            impl_flags: row.value()?,
            flags: row.value()?,
            name: row.value()?,
            signature: row.value()?,
            param_list: row.value()?,
        })
    }
}
