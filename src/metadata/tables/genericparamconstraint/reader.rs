use crate::{
    metadata::tables::{GenericParamConstraintRaw, RowCursor, RowReadable, TableId, TableInfoRef},
    Result,
};

impl RowReadable for GenericParamConstraintRaw {
    const TABLE: TableId = TableId::GenericParamConstraint;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(GenericParamConstraintRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            owner: row.value()?,
            constraint: row.coded()?,
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
            0x01, 0x00, // owner
            0x05, 0x00, // constraint - TypeRef 1
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::GenericParam, 1), (TableId::TypeRef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<GenericParamConstraintRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x2C00_0001);
        assert_eq!(row.owner, 1);
        assert_eq!(row.constraint, CodedIndex::new(TableId::TypeRef, 1));
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x01, 0x00, 0x01, 0x00, // owner
            0x04, 0x00, // constraint - TypeDef 1
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::GenericParam, u16::MAX as u32 + 2)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<GenericParamConstraintRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.owner, 0x0001_0001);
        assert_eq!(row.constraint, CodedIndex::new(TableId::TypeDef, 1));
    }
}
