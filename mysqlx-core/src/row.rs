use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::column::{Column, Columns};
use crate::error::{Error, Result};
use crate::value::{Decode, Value};

/// A type that can be used to index into a [`Row`].
///
/// The [`get`](Row::get) and [`try_get`](Row::try_get) methods of [`Row`] accept
/// any type that implements `ColumnIndex`. This trait is implemented for strings which
/// are used to look up a column by its label, and for `usize` which is used as a
/// positional index into the row.
pub trait ColumnIndex: Debug {
    /// Returns a valid positional index into the row, [`ColumnIndexOutOfBounds`], or,
    /// [`ColumnNotFound`].
    ///
    /// [`ColumnNotFound`]: Error::ColumnNotFound
    /// [`ColumnIndexOutOfBounds`]: Error::ColumnIndexOutOfBounds
    fn index(&self, row: &Row) -> Result<usize>;
}

impl ColumnIndex for usize {
    fn index(&self, row: &Row) -> Result<usize> {
        if *self >= row.len() {
            return Err(Error::ColumnIndexOutOfBounds { len: row.len(), index: *self });
        }

        Ok(*self)
    }
}

impl ColumnIndex for &'_ str {
    fn index(&self, row: &Row) -> Result<usize> {
        row.columns.find(self).ok_or_else(|| Error::ColumnNotFound((*self).into()))
    }
}

impl<I: ColumnIndex + ?Sized> ColumnIndex for &'_ I {
    #[inline]
    fn index(&self, row: &Row) -> Result<usize> {
        (**self).index(row)
    }
}

/// A single row of a tabular result.
///
/// The row owns its values; the column metadata is shared with the result it was
/// fetched from.
pub struct Row {
    values: Vec<Value>,
    columns: Arc<Columns>,
}

impl Row {
    // shape is checked by the cursor before a row is buffered
    pub(crate) fn new(values: Vec<Value>, columns: Arc<Columns>) -> Self {
        debug_assert_eq!(values.len(), columns.len());

        Self { values, columns }
    }

    /// Returns the number of fields in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the metadata of the columns of this row.
    #[must_use]
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Returns the metadata of a single column of this row.
    pub fn column<I: ColumnIndex>(&self, index: I) -> Result<&Column> {
        self.columns.get(index.index(self)?)
    }

    /// Returns the value of a single field, by position or column label.
    pub fn get<I: ColumnIndex>(&self, index: I) -> Result<&Value> {
        let index = index.index(self)?;

        Ok(&self.values[index])
    }

    /// Index into the row and decode a single value.
    ///
    /// ```rust,ignore
    /// let id: u64 = row.try_get(0)?;
    /// let name: Option<String> = row.try_get("name")?;
    /// ```
    pub fn try_get<T, I>(&self, index: I) -> Result<T>
    where
        T: Decode,
        I: ColumnIndex,
    {
        let value = self.get(&index)?;

        T::decode(value).map_err(|source| Error::ColumnDecode { index: format!("{index:?}"), source })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Row ")?;

        let mut debug_map = f.debug_map();

        for (column, value) in self.columns.iter().zip(&self.values) {
            debug_map.entry(&column.column_label(), value);
        }

        debug_map.finish()
    }
}
