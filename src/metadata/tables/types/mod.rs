//! Core infrastructure for typed access to metadata tables.
//!
//! - [`MetadataTable`] - a view over the rows of one table, decoding rows on access
//! - [`RowReadable`] - implemented by every raw row type to decode its columns
//! - [`RowCursor`] - column-by-column reads following the layout in [`TableId::columns`]
//! - [`TableInfo`] - heap and table sizes that determine column widths
//! - [`CodedIndex`] / [`CodedIndexType`] - compact multi-table references
//! - [`TableId`] - table numbers and their column layouts

mod codedindex;
mod row;
mod tableid;
mod tableinfo;

use std::marker::PhantomData;

use crate::{metadata::token::Token, Error::OutOfBounds, Result};

pub use codedindex::{CodedIndex, CodedIndexType};
pub use row::RowCursor;
pub use tableid::{Column, TableId};
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};

/// A row type of a metadata table.
pub trait RowReadable: Sized + Send {
    /// The table this row type belongs to
    const TABLE: TableId;

    /// Byte size of a single row for the given heap and table sizes
    fn row_size(sizes: &TableInfoRef) -> u32 {
        sizes.row_size(Self::TABLE)
    }

    /// Token of row `rid`
    fn token(rid: u32) -> Token {
        Token::from_parts(Self::TABLE as u8, rid)
    }

    /// Reads the row `rid` starting at `offset` and advances `offset` past it.
    ///
    /// # Errors
    /// Returns an error if the row data is truncated or contains an invalid coded index.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// A typed view over the rows of one metadata table.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Creates a view over `row_count` rows at the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is too short to hold every row.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = T::row_size(&sizes);
        if (u64::from(row_count) * u64::from(row_size)) > data.len() as u64 {
            return Err(OutOfBounds);
        }

        Ok(MetadataTable {
            data,
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Total size of the table in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Size of a single row in bytes
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Reads the row with the 1-based index `rid`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for `rid` 0 or past the last row, and any error of
    /// the row decoder.
    pub fn get(&self, rid: u32) -> Result<T> {
        if rid == 0 || self.row_count < rid {
            return Err(OutOfBounds);
        }

        T::row_read(
            self.data,
            &mut ((rid as usize - 1) * self.row_size as usize),
            rid,
            &self.sizes,
        )
    }

    /// Iterates over all rows in table order, stopping at the first error
    #[must_use]
    pub fn iter(&self) -> TableIterator<'_, 'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
            current_offset: 0,
        }
    }
}

impl<'t, 'a, T: RowReadable> IntoIterator for &'t MetadataTable<'a, T> {
    type Item = Result<T>;
    type IntoIter = TableIterator<'t, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over the rows of a [`MetadataTable`].
///
/// Yields `Err` once if a row fails to decode, and ends afterwards.
pub struct TableIterator<'t, 'a, T> {
    table: &'t MetadataTable<'a, T>,
    current_row: u32,
    current_offset: usize,
}

impl<T: RowReadable> Iterator for TableIterator<'_, '_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        let row = T::row_read(
            self.table.data,
            &mut self.current_offset,
            self.current_row + 1,
            &self.table.sizes,
        );

        self.current_row = match row {
            Ok(_) => self.current_row + 1,
            Err(_) => self.table.row_count,
        };

        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.table.row_count - self.current_row) as usize;
        (0, Some(remaining))
    }
}
