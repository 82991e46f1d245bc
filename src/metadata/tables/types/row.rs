use std::slice;

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::tables::{CodedIndex, Column, TableId, TableInfoRef},
    Result,
};

/// Walks the columns of one row in the order of [`TableId::columns`].
///
/// Each call consumes the next column and advances the shared offset by its width, so a row
/// decoder only names what it stores and never repeats the layout.
pub struct RowCursor<'a> {
    data: &'a [u8],
    offset: &'a mut usize,
    sizes: &'a TableInfoRef,
    columns: slice::Iter<'static, Column>,
}

impl<'a> RowCursor<'a> {
    /// A cursor over a row of `table` starting at `offset`
    pub fn new(
        table: TableId,
        data: &'a [u8],
        offset: &'a mut usize,
        sizes: &'a TableInfoRef,
    ) -> Self {
        RowCursor {
            data,
            offset,
            sizes,
            columns: table.columns().iter(),
        }
    }

    /// Reads a constant, heap index or table index column.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated data and
    /// [`crate::Error::Malformed`] when the next column is a coded index or missing.
    pub fn value(&mut self) -> Result<u32> {
        let sizes = self.sizes;
        match self.next_column()? {
            Column::Fixed(2) => Ok(u32::from(read_le_at::<u16>(self.data, self.offset)?)),
            Column::Fixed(4) => read_le_at::<u32>(self.data, self.offset),
            Column::Str => read_le_at_dyn(self.data, self.offset, sizes.is_large_str()),
            Column::Guid => read_le_at_dyn(self.data, self.offset, sizes.is_large_guid()),
            Column::Blob => read_le_at_dyn(self.data, self.offset, sizes.is_large_blob()),
            Column::Table(target) => {
                read_le_at_dyn(self.data, self.offset, sizes.is_large(target))
            }
            column => Err(malformed_error!("Column {:?} is not a plain value", column)),
        }
    }

    /// Reads and decodes a coded index column.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for an unknown tag or when the next column is not a
    /// coded index.
    pub fn coded(&mut self) -> Result<CodedIndex> {
        match self.next_column()? {
            Column::Coded(kind) => CodedIndex::read(self.data, self.offset, self.sizes, kind),
            column => Err(malformed_error!("Column {:?} is not a coded index", column)),
        }
    }

    fn next_column(&mut self) -> Result<Column> {
        self.columns
            .next()
            .copied()
            .ok_or_else(|| malformed_error!("Row read past its last column"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::TableInfo;

    #[test]
    fn follows_column_widths() {
        // MethodSemantics: Fixed(2), Table(MethodDef), Coded(HasSemantics)
        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::MethodDef, 0x1_0000), (TableId::Property, 4)],
            false,
            false,
            false,
        ));
        let data = [0x08, 0x00, 0x07, 0x00, 0x01, 0x00, 0x0B, 0x00];

        let mut offset = 0;
        let mut row = RowCursor::new(TableId::MethodSemantics, &data, &mut offset, &sizes);
        assert_eq!(row.value().unwrap(), 8);
        assert_eq!(row.value().unwrap(), 0x0001_0007);
        assert_eq!(row.coded().unwrap(), CodedIndex::new(TableId::Property, 5));
        assert!(row.value().is_err());
        assert_eq!(offset, 8);
    }

    #[test]
    fn column_kind_mismatch() {
        let sizes = Arc::new(TableInfo::new_test(&[], false, false, false));
        let data = [0u8; 8];

        let mut offset = 0;
        let mut row = RowCursor::new(TableId::TypeRef, &data, &mut offset, &sizes);
        assert!(row.value().is_err());

        let mut offset = 0;
        let mut row = RowCursor::new(TableId::Field, &data, &mut offset, &sizes);
        assert!(row.coded().is_err());
    }

    #[test]
    fn truncated_row() {
        let sizes = Arc::new(TableInfo::new_test(&[], true, true, true));
        let data = [0x01, 0x00, 0x02];

        let mut offset = 0;
        let mut row = RowCursor::new(TableId::Property, &data, &mut offset, &sizes);
        assert_eq!(row.value().unwrap(), 1);
        assert!(row.value().is_err());
    }
}
