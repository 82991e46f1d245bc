use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le_at,
    metadata::tables::{CodedIndexType, Column, TableId},
    Error::OutOfBounds,
    Result,
};

/// Row count of a table and the number of bits needed to index it.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Bits required to address every row
    pub bits: u8,
}

impl TableRowInfo {
    /// Computes the index width for a table with `rows` rows
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self { rows, bits }
    }
}

/// Size information needed to decode the variable-width columns of every table.
///
/// Heap indexes are 2 bytes unless the corresponding `HeapSizes` flag is set; table and coded
/// indexes are 2 bytes unless the referenced tables are too large (ECMA-335 II.24.2.6).
#[derive(Clone, Default, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared handle to a [`TableInfo`]
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Reads the row counts that follow the `#~` header for every table set in `valid_bitvec`.
    ///
    /// `data` starts at the `#~` stream; `heap_sizes` is its `HeapSizes` byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row counts are truncated.
    pub fn new(data: &[u8], heap_sizes: u8, valid_bitvec: u64) -> Result<Self> {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: heap_sizes & 0x01 == 0x01,
            is_large_index_guid: heap_sizes & 0x02 == 0x02,
            is_large_index_blob: heap_sizes & 0x04 == 0x04,
        };

        let mut next_row_offset = 24;
        for table_id in TableId::iter() {
            if (valid_bitvec & (1 << table_id as usize)) == 0 {
                continue;
            }

            if data.len() < next_row_offset + 4 {
                return Err(OutOfBounds);
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            table_info.rows[table_id as usize] = TableRowInfo::new(row_count);
        }

        table_info.calculate_coded_index_bits();

        Ok(table_info)
    }

    /// Builds a `TableInfo` with the given row counts and heap index sizes, for tests.
    #[cfg(test)]
    pub fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: large_str,
            is_large_index_guid: large_guid,
            is_large_index_blob: large_blob,
        };

        for valid_table in valid_tables {
            table_info.rows[valid_table.0 as usize] = TableRowInfo::new(valid_table.1);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Splits a raw coded index into table and row.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the tag selects no table.
    pub fn decode_coded_index(
        &self,
        value: u32,
        coded_index_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        let tables = coded_index_type.tables();
        let tag_bits = coded_index_type.tag_bits();
        let tag_mask = (1 << tag_bits) - 1;

        let tag = (value & tag_mask) as usize;
        match tables.get(tag) {
            Some(table) => Ok((*table, value >> tag_bits)),
            None => Err(malformed_error!(
                "Invalid tag {} for coded index {:?}",
                tag,
                coded_index_type
            )),
        }
    }

    /// Row count and index width of `table`
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// True if indexes into `table` are 4 bytes wide
    #[must_use]
    pub fn is_large(&self, table: TableId) -> bool {
        self.table_index_bytes(table) == 4
    }

    /// True if `#Strings` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// True if `#GUID` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// True if `#Blob` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    /// Width of a `#GUID` index
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    /// Width of a `#Blob` index
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Width of a simple index into `table_id`
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.rows[table_id as usize].bits > 16 {
            4
        } else {
            2
        }
    }

    /// Width of a coded index of type `coded_index_type`
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.coded_indexes[coded_index_type as usize] > 16 {
            4
        } else {
            2
        }
    }

    /// Size of a single row of `table`, derived from its column layout
    #[must_use]
    pub fn row_size(&self, table: TableId) -> u32 {
        table
            .columns()
            .iter()
            .map(|column| {
                u32::from(match column {
                    Column::Fixed(width) => *width,
                    Column::Str => self.str_bytes(),
                    Column::Guid => self.guid_bytes(),
                    Column::Blob => self.blob_bytes(),
                    Column::Table(target) => self.table_index_bytes(*target),
                    Column::Coded(coded_index_type) => self.coded_index_bytes(*coded_index_type),
                })
            })
            .sum()
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let max_bits = coded_index
                .tables()
                .iter()
                .map(|table| self.rows[*table as usize].bits)
                .max()
                .unwrap_or(1);

            self.coded_indexes[coded_index as usize] = max_bits + coded_index.tag_bits();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_widths() {
        let info = TableInfo::new_test(
            &[
                (TableId::TypeDef, 0x3FFF),
                (TableId::TypeRef, 0x10),
                (TableId::MethodDef, 0x1_0000),
                (TableId::Field, 0xFFFF),
            ],
            false,
            true,
            false,
        );

        assert_eq!(info.table_index_bytes(TableId::Field), 2);
        assert_eq!(info.table_index_bytes(TableId::MethodDef), 4);
        assert!(info.is_large(TableId::MethodDef));
        // 14 bits of rows + 2 tag bits still fit
        assert_eq!(info.coded_index_bytes(CodedIndexType::TypeDefOrRef), 2);
        // MethodDef needs 17 bits on its own
        assert_eq!(info.coded_index_bytes(CodedIndexType::MethodDefOrRef), 4);
        assert_eq!(info.str_bytes(), 2);
        assert_eq!(info.blob_bytes(), 4);
    }

    #[test]
    fn coded_index_threshold() {
        let small = TableInfo::new_test(&[(TableId::TypeDef, 0x3FFF)], false, false, false);
        let large = TableInfo::new_test(&[(TableId::TypeDef, 0x4000)], false, false, false);

        assert_eq!(small.coded_index_bytes(CodedIndexType::TypeDefOrRef), 2);
        assert_eq!(large.coded_index_bytes(CodedIndexType::TypeDefOrRef), 4);
    }

    #[test]
    fn decode() {
        let info = TableInfo::new_test(&[], false, false, false);

        assert_eq!(
            info.decode_coded_index(0x49, CodedIndexType::TypeDefOrRef)
                .unwrap(),
            (TableId::TypeRef, 0x12)
        );
        assert_eq!(
            info.decode_coded_index(0x2B, CodedIndexType::CustomAttributeType)
                .unwrap(),
            (TableId::MemberRef, 5)
        );
        assert!(info
            .decode_coded_index(0x03, CodedIndexType::TypeDefOrRef)
            .is_err());
    }

    #[test]
    fn row_sizes() {
        let small = TableInfo::new_test(&[], false, false, false);
        assert_eq!(small.row_size(TableId::TypeDef), 14);
        assert_eq!(small.row_size(TableId::MethodDef), 14);
        assert_eq!(small.row_size(TableId::Module), 10);
        assert_eq!(small.row_size(TableId::Assembly), 22);

        let large = TableInfo::new_test(&[], true, true, true);
        assert_eq!(large.row_size(TableId::Field), 10);
        assert_eq!(large.row_size(TableId::Module), 18);
    }

    #[test]
    fn row_counts() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x00, 0x00, 0x00, // reserved
            0x02, 0x00,             // version
            0x05,                   // heap sizes
            0x01,                   // reserved
            0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // valid
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sorted
            0x01, 0x00, 0x00, 0x00, // Module
            0x07, 0x00, 0x00, 0x00, // TypeDef
        ];

        let info = TableInfo::new(&data, data[6], 0x05).unwrap();
        assert_eq!(info.get(TableId::Module).rows, 1);
        assert_eq!(info.get(TableId::TypeDef).rows, 7);
        assert_eq!(info.get(TableId::TypeRef).rows, 0);
        assert!(info.is_large_str());
        assert!(!info.is_large_guid());
        assert!(info.is_large_blob());

        assert!(TableInfo::new(&data[..28], data[6], 0x05).is_err());
    }
}
