use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::{
    file::io::read_le,
    metadata::tables::{MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef},
    Error::OutOfBounds,
    Result,
};

/// `HeapSizes` flag announcing four bytes of extra data after the row counts
const EXTRA_DATA: u8 = 0x40;

/// The header of the `#~` stream and the location of every table that follows it.
///
/// Rows are not decoded up front; [`TablesHeader::table`] hands out a typed
/// [`MetadataTable`] over the bytes of one table and rows are read on access.
///
/// ```rust,no_run
/// use dotbrowse::metadata::{streams::TablesHeader, tables::TypeDefRaw};
///
/// # fn example(tables: &TablesHeader) -> dotbrowse::Result<()> {
/// if let Some(typedefs) = tables.table::<TypeDefRaw>() {
///     for typedef in &typedefs {
///         println!("flags {:#x}", typedef?.flags);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct TablesHeader<'a> {
    /// Major version of the table schema, shall be 2
    pub major_version: u8,
    /// Minor version of the table schema, shall be 0
    pub minor_version: u8,
    /// Raw `HeapSizes` byte
    pub heap_sizes: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths of every table
    pub info: TableInfoRef,
    data: &'a [u8],
    offsets: Vec<usize>,
}

/// Row count of one present table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    /// The table
    pub table_id: TableId,
    /// Its number of rows
    pub row_count: u32,
}

impl<'a> TablesHeader<'a> {
    /// Parses the `#~` stream header and locates every present table.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the header or any table is truncated, and
    /// [`crate::Error::Malformed`] if the header marks no tables or unknown tables as present.
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let valid = read_le::<u64>(&data[8..])?;
        if valid == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        if valid >> (TableId::GenericParamConstraint as u64 + 1) != 0 {
            return Err(malformed_error!("Unknown tables marked as present - {:#x}", valid));
        }

        let heap_sizes = read_le::<u8>(&data[6..])?;
        let info = Arc::new(TableInfo::new(data, heap_sizes, valid)?);

        let mut current_offset = 24 + valid.count_ones() as usize * 4;
        if heap_sizes & EXTRA_DATA != 0 {
            current_offset += 4;
        }

        let mut offsets = vec![0; TableId::GenericParamConstraint as usize + 1];
        for table_id in TableId::iter() {
            let rows = info.get(table_id).rows;
            if rows == 0 {
                continue;
            }

            let size = u64::from(rows) * u64::from(info.row_size(table_id));
            let Some(end) = (current_offset as u64).checked_add(size) else {
                return Err(OutOfBounds);
            };

            if end > data.len() as u64 {
                return Err(OutOfBounds);
            }

            offsets[table_id as usize] = current_offset;
            current_offset = end as usize;
        }

        Ok(TablesHeader {
            major_version: read_le::<u8>(&data[4..])?,
            minor_version: read_le::<u8>(&data[5..])?,
            heap_sizes,
            valid,
            sorted: read_le::<u64>(&data[16..])?,
            info,
            data,
            offsets,
        })
    }

    /// Returns a typed view over the table of `T`, or `None` if it has no rows
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> Option<MetadataTable<'a, T>> {
        let rows = self.table_row_count(T::TABLE);
        if rows == 0 {
            return None;
        }

        let data = self.data.get(self.offsets[T::TABLE as usize]..)?;
        MetadataTable::new(data, rows, self.info.clone()).ok()
    }

    /// Number of tables present
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// True if `table_id` is marked present
    #[must_use]
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.valid & (1 << table_id as u64) != 0
    }

    /// Iterates over the present tables in table order
    pub fn present_tables(&self) -> impl Iterator<Item = TableId> + '_ {
        TableId::iter().filter(|table_id| self.has_table(*table_id))
    }

    /// Row count of `table_id`, 0 if absent
    #[must_use]
    pub fn table_row_count(&self, table_id: TableId) -> u32 {
        self.info.get(table_id).rows
    }

    /// Row counts of every present table
    #[must_use]
    pub fn table_summary(&self) -> Vec<TableSummary> {
        self.present_tables()
            .map(|table_id| TableSummary {
                table_id,
                row_count: self.table_row_count(table_id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::{TypeDefRaw, TypeRefRaw};

    #[rustfmt::skip]
    fn two_tables() -> Vec<u8> {
        let mut data = vec![
            0x00, 0x00, 0x00, 0x00,                         // reserved
            0x02, 0x00,                                     // version 2.0
            0x00,                                           // heap sizes
            0x01,                                           // reserved
            0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // valid - TypeRef, TypeDef
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sorted
            0x01, 0x00, 0x00, 0x00,                         // TypeRef rows
            0x01, 0x00, 0x00, 0x00,                         // TypeDef rows
        ];

        // TypeRef: scope, name, namespace
        data.extend_from_slice(&[0x06, 0x00, 0x10, 0x00, 0x20, 0x00]);
        // TypeDef: flags, name, namespace, extends, field_list, method_list
        data.extend_from_slice(&[
            0x01, 0x00, 0x10, 0x00,
            0x30, 0x00,
            0x40, 0x00,
            0x05, 0x00,
            0x01, 0x00,
            0x01, 0x00,
        ]);
        data
    }

    #[test]
    fn locates_tables() {
        let data = two_tables();
        let header = TablesHeader::from(&data).unwrap();

        assert_eq!(header.major_version, 2);
        assert_eq!(header.minor_version, 0);
        assert_eq!(header.table_count(), 2);
        assert!(header.has_table(TableId::TypeDef));
        assert!(!header.has_table(TableId::Field));
        assert_eq!(
            header.present_tables().collect::<Vec<_>>(),
            vec![TableId::TypeRef, TableId::TypeDef]
        );

        let typerefs = header.table::<TypeRefRaw>().unwrap();
        assert_eq!(typerefs.get(1).unwrap().type_name, 0x10);

        let typedefs = header.table::<TypeDefRaw>().unwrap();
        let typedef = typedefs.get(1).unwrap();
        assert_eq!(typedef.flags, 0x0010_0001);
        assert_eq!(typedef.type_name, 0x30);
        assert_eq!(typedef.type_namespace, 0x40);
        assert_eq!(typedef.extends.tag, TableId::TypeRef);
        assert_eq!(typedef.extends.row, 1);

        assert!(header.table::<crate::metadata::tables::FieldRaw>().is_none());
    }

    #[test]
    fn truncated_table() {
        let mut data = two_tables();
        data.pop();
        assert!(matches!(TablesHeader::from(&data), Err(OutOfBounds)));
    }

    #[test]
    fn nothing_present() {
        let mut data = two_tables();
        data[8] = 0;
        assert!(TablesHeader::from(&data).is_err());
    }

    #[test]
    fn unknown_table() {
        let mut data = two_tables();
        data[13] = 0x80;
        assert!(TablesHeader::from(&data).is_err());
    }

    #[test]
    fn summary() {
        let data = two_tables();
        let header = TablesHeader::from(&data).unwrap();
        assert_eq!(
            header.table_summary(),
            vec![
                TableSummary { table_id: TableId::TypeRef, row_count: 1 },
                TableSummary { table_id: TableId::TypeDef, row_count: 1 },
            ]
        );
    }
}
