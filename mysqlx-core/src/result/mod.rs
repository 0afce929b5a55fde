//! The results of executed statements.
//!
//! | statement | result |
//! |---|---|
//! | `add`, `modify`, `remove` on a collection; `insert`, `update`, `delete` on a table | [`QueryResult`] |
//! | `select` on a table | [`RowResult`] |
//! | `find` on a collection | [`DocResult`] |
//! | SQL statements | [`SqlResult`] |
//!
//! Results read from the server lazily. Rows and documents are pulled as they are
//! fetched; asking for the warnings or the outcome of a result first reads whatever is
//! left of its rows into memory, where they remain available to fetch.
//!
//! Results own the reply they read from. Dropping a result (or overwriting it) releases
//! the reply, discarding anything that was not read. A result can be moved out with
//! `take()`, which leaves an empty result behind: an empty result has no warnings and
//! reports [`Error::Empty`](crate::Error::Empty) from its row and document accessors.

use crate::error::Result;
use crate::row::Row;
use crate::state::ResultState;

mod doc;
mod plain;
mod row;
mod sql;

pub use doc::{DocResult, Docs};
pub use plain::QueryResult;
pub use row::RowResult;
pub use sql::SqlResult;

// operations every result shares: construction, warnings and ownership transfer
macro_rules! impl_result {
    ($name:ident) => {
        impl $name {
            /// Returns the number of warnings reported by the server so far.
            pub fn warning_count(&mut self) -> $crate::error::Result<usize> {
                Ok(self.state.warnings()?.len())
            }

            /// Returns the warnings reported by the server so far, in the order
            /// they were emitted.
            pub fn warnings(&mut self) -> $crate::error::Result<&$crate::warning::Warnings> {
                self.state.warnings()
            }

            /// Returns the warning at the given, 0-based position.
            pub fn warning(&mut self, index: usize) -> $crate::error::Result<&$crate::warning::Warning> {
                self.state.warnings()?.get(index)
            }

            /// Moves the contents out of this result, leaving an empty result behind.
            #[must_use]
            pub fn take(&mut self) -> Self {
                ::std::mem::take(self)
            }
        }

        impl From<$crate::source::ResultInit> for $name {
            fn from(init: $crate::source::ResultInit) -> Self {
                Self { state: $crate::state::ResultState::from(init) }
            }
        }
    };
}

// outcome of statements that modify data
macro_rules! impl_outcome {
    ($name:ident) => {
        impl $name {
            /// Returns the number of items changed, deleted or inserted by the statement.
            pub fn affected_items_count(&mut self) -> $crate::error::Result<u64> {
                Ok(self.state.outcome()?.affected_items)
            }

            /// Returns the value generated for an `AUTO_INCREMENT` column by the
            /// statement, if one was generated.
            pub fn auto_increment_value(&mut self) -> $crate::error::Result<Option<u64>> {
                let id = self.state.outcome()?.last_insert_id;

                Ok((id != 0).then_some(id))
            }
        }
    };
}

// tabular access shared by `RowResult` and `SqlResult`
macro_rules! impl_rows {
    ($name:ident) => {
        impl $name {
            /// Returns the number of columns of the current result.
            pub fn column_count(&mut self) -> $crate::error::Result<usize> {
                Ok(self.state.columns()?.len())
            }

            /// Returns the metadata of the column at the given, 0-based position.
            pub fn column(&mut self, index: usize) -> $crate::error::Result<&$crate::column::Column> {
                self.state.columns()?.get(index)
            }

            pub fn columns(&mut self) -> $crate::error::Result<&$crate::column::Columns> {
                let columns: &$crate::column::Columns = self.state.columns()?;

                Ok(columns)
            }

            /// Fetches the next row, or returns `None` once all rows were fetched.
            pub fn fetch_one(&mut self) -> $crate::error::Result<Option<$crate::row::Row>> {
                self.state.next_row()
            }

            /// Fetches all rows that were not fetched yet.
            ///
            /// Returns an empty `Vec` once all rows were fetched.
            pub fn fetch_all(&mut self) -> $crate::error::Result<Vec<$crate::row::Row>> {
                self.state.fetch_all()
            }

            /// Returns the number of rows that were not fetched yet.
            ///
            /// The remaining rows are read from the server to answer; they stay
            /// available to fetch.
            pub fn count(&mut self) -> $crate::error::Result<usize> {
                self.state.count()
            }

            /// Iterates over the rows that were not fetched yet.
            ///
            /// The iterator shares its position with [`fetch_one`](Self::fetch_one)
            /// and [`fetch_all`](Self::fetch_all).
            pub fn iter(&mut self) -> $crate::result::Rows<'_> {
                $crate::result::Rows::new(&mut self.state)
            }
        }

        impl<'r> IntoIterator for &'r mut $name {
            type Item = $crate::error::Result<$crate::row::Row>;
            type IntoIter = $crate::result::Rows<'r>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }
    };
}

pub(crate) use impl_outcome;
pub(crate) use impl_result;
pub(crate) use impl_rows;

/// An iterator over the remaining rows of a result.
///
/// Yields each row once. After an error, the iterator ends.
#[derive(Debug)]
pub struct Rows<'r> {
    state: &'r mut ResultState,
    done: bool,
}

impl<'r> Rows<'r> {
    pub(crate) fn new(state: &'r mut ResultState) -> Self {
        Self { state, done: false }
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = self.state.next_row().transpose();

        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }

        next
    }
}
