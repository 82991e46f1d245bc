use crate::{
    metadata::tables::{MemberRefRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for MemberRefRaw {
    const TABLE: TableId = TableId::MemberRef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(MemberRefRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            class: row.coded()?,
            name: row.value()?,
            signature: row.value()?,
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
            0x09, 0x00, // class - TypeRef 1
            0x20, 0x00, // name
            0x30, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::MemberRef, 1), (TableId::TypeRef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MemberRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0A00_0001);
        assert_eq!(row.class, CodedIndex::new(TableId::TypeRef, 1));
        assert_eq!(row.name, 0x20);
        assert_eq!(row.signature, 0x30);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x0C, 0x00, 0x00, 0x00, // class - TypeSpec 1
            0x02, 0x02, 0x02, 0x02, // name
            0x03, 0x03, 0x03, 0x03, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::TypeSpec, u16::MAX as u32 + 2)],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<MemberRefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.class, CodedIndex::new(TableId::TypeSpec, 1));
        assert_eq!(row.name, 0x02020202);
        assert_eq!(row.signature, 0x03030303);
    }
}
