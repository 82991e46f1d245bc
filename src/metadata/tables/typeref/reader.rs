use crate::{
    metadata::tables::{RowCursor, RowReadable, TableId, TableInfoRef, TypeRefRaw},
    Result,
};

impl RowReadable for TypeRefRaw {
    const TABLE: TableId = TableId::TypeRef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(TypeRefRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            resolution_scope: row.coded()?,
            type_name: row.value()?,
            type_namespace: row.value()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::{CodedIndex, MetadataTable, TableInfo};

    #[test]
    fn crafted_short() {
        let data = vec![
            0x06, 0x00, // resolution_scope - AssemblyRef 1
            0x42, 0x00, // type_name
            0x43, 0x00, // type_namespace
            0x0F, 0x00, // resolution_scope - TypeRef 3
            0x44, 0x00, // type_name
            0x00, 0x00, // type_namespace
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::TypeRef, 2), (TableId::AssemblyRef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<TypeRefRaw>::new(&data, 2, sizes).unwrap();

        let first = table.get(1).unwrap();
        assert_eq!(first.token.value(), 0x0100_0001);
        assert_eq!(first.resolution_scope, CodedIndex::new(TableId::AssemblyRef, 1));
        assert_eq!(first.type_name, 0x42);
        assert_eq!(first.type_namespace, 0x43);

        let rows: Vec<TypeRefRaw> = table.iter().map(|row| row.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].rid, 2);
        assert_eq!(rows[1].offset, 6);
        assert_eq!(rows[1].resolution_scope, CodedIndex::new(TableId::TypeRef, 3));
        assert_eq!(rows[1].type_name, 0x44);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x06, 0x00, 0x00, 0x00, // resolution_scope
            0x00, 0x00, 0x00, 0x02, // type_name
            0x00, 0x00, 0x00, 0x03, // type_namespace
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::AssemblyRef, u16::MAX as u32 + 2)],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<TypeRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.resolution_scope, CodedIndex::new(TableId::AssemblyRef, 1));
        assert_eq!(row.type_name, 0x0200_0000);
        assert_eq!(row.type_namespace, 0x0300_0000);
    }
}
