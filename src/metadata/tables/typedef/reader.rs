use crate::{
    metadata::tables::{RowCursor, RowReadable, TableId, TableInfoRef, TypeDefRaw},
    Result,
};

impl RowReadable for TypeDefRaw {
    const TABLE: TableId = TableId::TypeDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        let start = *offset;
        let mut row = RowCursor::new(Self::TABLE, data, offset, sizes);

        Ok(TypeDefRaw {
            rid,
            token: Self::token(rid),
            offset: start,
            flags: row.value()?,
            type_name: row.value()?,
            type_namespace: row.value()?,
            extends: row.coded()?,
            field_list: row.value()?,
            method_list: row.value()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::{CodedIndex, MetadataTable, TableInfo};

    #[test]
    fn module_and_class_rows() {
        #[rustfmt::skip]
        let data = [
            // <Module>: no base type
            0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
            // public class extending TypeRef 1
            0x01, 0x00, 0x10, 0x00, 0x09, 0x00, 0x12, 0x00, 0x05, 0x00, 0x02, 0x00, 0x03, 0x00,
        ];
        let sizes = Arc::new(TableInfo::new_test(
            &[
                (TableId::TypeDef, 2),
                (TableId::TypeRef, 1),
                (TableId::Field, 2),
                (TableId::MethodDef, 3),
            ],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<TypeDefRaw>::new(&data, 2, sizes).unwrap();
        let rows = table.iter().collect::<Result<Vec<_>>>().unwrap();

        assert!(rows[0].extends.is_null());
        assert_eq!(rows[0].type_name, 1);

        let class = &rows[1];
        assert_eq!(class.token.value(), 0x0200_0002);
        assert_eq!(class.offset, 14);
        assert_eq!(class.flags, 0x0010_0001);
        assert_eq!((class.type_name, class.type_namespace), (0x09, 0x12));
        assert_eq!(class.extends, CodedIndex::new(TableId::TypeRef, 1));
        assert_eq!((class.field_list, class.method_list), (2, 3));
    }

    #[test]
    fn wide_string_and_field_indexes() {
        #[rustfmt::skip]
        let data = [
            0x81, 0x01, 0x00, 0x00, // flags
            0x10, 0x00, 0x01, 0x00, // name
            0x20, 0x00, 0x01, 0x00, // namespace
            0x09, 0x00,             // extends - TypeRef 2
            0x00, 0x00, 0x01, 0x00, // field list
            0x07, 0x00,             // method list
        ];
        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::Field, 0x1_0001), (TableId::MethodDef, 7)],
            true,
            false,
            false,
        ));
        let table = MetadataTable::<TypeDefRaw>::new(&data, 1, sizes.clone()).unwrap();
        assert_eq!(table.row_size(), 20);

        let row = table.get(1).unwrap();
        assert_eq!(row.flags, 0x181);
        assert_eq!(row.type_name, 0x0001_0010);
        assert_eq!(row.type_namespace, 0x0001_0020);
        assert_eq!(row.extends, CodedIndex::new(TableId::TypeRef, 2));
        assert_eq!(row.field_list, 0x0001_0000);
        assert_eq!(row.method_list, 7);

        assert!(MetadataTable::<TypeDefRaw>::new(&data[..19], 1, sizes).is_err());
    }
}
