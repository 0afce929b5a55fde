//! A scripted, in-memory [`ResultSource`] for tests.
//!
//! ```rust,ignore
//! let source = MockSource::new().result(
//!     MockResult::new()
//!         .columns(vec![ColumnDefinition::new("id", Type::BigInt.code())])
//!         .row(vec![Value::Int(1)])
//!         .affected_items(1),
//! );
//!
//! let result = RowResult::from(ResultInit::new(source));
//! ```

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::column::ColumnDefinition;
use crate::document::DocumentId;
use crate::error::BoxDynError;
use crate::source::{Outcome, ResultSource};
use crate::value::Value;
use crate::warning::Warning;

bitflags::bitflags! {
    // calls of the source that fail for the current result
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    struct Faults: u8 {
        const HAS_DATA = 1;
        const COLUMNS = 2;
        const WARNINGS = 4;
        const OUTCOME = 8;
        const NEXT_RESULT = 16;
    }
}

fn failure(what: &str) -> BoxDynError {
    Box::new(io::Error::other(format!("mock failure reading {what}")))
}

/// One scripted result of a [`MockSource`].
#[derive(Debug, Clone, Default)]
pub struct MockResult {
    columns: Option<Vec<ColumnDefinition>>,
    rows: VecDeque<Vec<Value>>,
    warnings: VecDeque<Warning>,
    outcome: Outcome,
    fail_at_row: Option<usize>,
    faults: Faults,
    rows_read: usize,
}

impl MockResult {
    /// A result without data and with an empty outcome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes this a result with data, described by the given columns.
    #[must_use]
    pub fn columns(mut self, columns: Vec<ColumnDefinition>) -> Self {
        self.columns = Some(columns);
        self
    }

    #[must_use]
    pub fn row(mut self, values: Vec<Value>) -> Self {
        self.rows.push_back(values);
        self
    }

    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Value>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Adds a document; documents are sent as rows with a single JSON column.
    #[must_use]
    pub fn document(self, json: &str) -> Self {
        self.row(vec![Value::String(json.to_owned())])
    }

    #[must_use]
    pub fn warning(mut self, warning: Warning) -> Self {
        self.warnings.push_back(warning);
        self
    }

    #[must_use]
    pub const fn affected_items(mut self, affected_items: u64) -> Self {
        self.outcome.affected_items = affected_items;
        self
    }

    #[must_use]
    pub const fn last_insert_id(mut self, id: u64) -> Self {
        self.outcome.last_insert_id = id;
        self
    }

    #[must_use]
    pub fn document_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.outcome.document_ids.push(id.into());
        self
    }

    /// Fails the read of the row at `index` (0-based) instead of returning it.
    #[must_use]
    pub const fn fail_at_row(mut self, index: usize) -> Self {
        self.fail_at_row = Some(index);
        self
    }

    /// Fails the check whether this result carries data.
    #[must_use]
    pub fn fail_has_data(self) -> Self {
        self.fail(Faults::HAS_DATA)
    }

    /// Fails the read of the column metadata.
    #[must_use]
    pub fn fail_columns(self) -> Self {
        self.fail(Faults::COLUMNS)
    }

    /// Fails the read of the first warning.
    #[must_use]
    pub fn fail_warnings(self) -> Self {
        self.fail(Faults::WARNINGS)
    }

    #[must_use]
    pub fn fail_outcome(self) -> Self {
        self.fail(Faults::OUTCOME)
    }

    /// Fails moving on from this result to the next one.
    #[must_use]
    pub fn fail_next_result(self) -> Self {
        self.fail(Faults::NEXT_RESULT)
    }

    fn fail(mut self, faults: Faults) -> Self {
        self.faults |= faults;
        self
    }

    fn check(&self, fault: Faults, what: &str) -> Result<(), BoxDynError> {
        if self.faults.contains(fault) { Err(failure(what)) } else { Ok(()) }
    }
}

/// A [`ResultSource`] replaying a sequence of [`MockResult`]s.
#[derive(Debug, Default)]
pub struct MockSource {
    results: VecDeque<MockResult>,
    closed: Arc<AtomicBool>,
    fail_on_close: bool,
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to the sequence.
    #[must_use]
    pub fn result(mut self, result: MockResult) -> Self {
        self.results.push_back(result);
        self
    }

    /// Makes [`close`](ResultSource::close) report an error after releasing.
    #[must_use]
    pub const fn fail_on_close(mut self) -> Self {
        self.fail_on_close = true;
        self
    }

    /// A flag set once the source was closed.
    #[must_use]
    pub fn closed(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    fn current(&mut self) -> Result<&mut MockResult, BoxDynError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err("mock source was already closed".into());
        }

        self.results.front_mut().ok_or_else(|| "mock source has no current result".into())
    }
}

impl ResultSource for MockSource {
    fn has_data(&mut self) -> Result<bool, BoxDynError> {
        let current = self.current()?;
        current.check(Faults::HAS_DATA, "the result kind")?;

        Ok(current.columns.is_some())
    }

    fn columns(&mut self) -> Result<Vec<ColumnDefinition>, BoxDynError> {
        let current = self.current()?;
        current.check(Faults::COLUMNS, "columns")?;

        current.columns.clone().ok_or_else(|| "mock result has no data".into())
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>, BoxDynError> {
        let current = self.current()?;

        if current.fail_at_row == Some(current.rows_read) {
            return Err(failure(&format!("row {}", current.rows_read)));
        }

        let row = current.rows.pop_front();

        if row.is_some() {
            current.rows_read += 1;
        }

        Ok(row)
    }

    fn next_warning(&mut self) -> Result<Option<Warning>, BoxDynError> {
        let current = self.current()?;
        current.check(Faults::WARNINGS, "warnings")?;

        Ok(current.warnings.pop_front())
    }

    fn outcome(&mut self) -> Result<Outcome, BoxDynError> {
        let current = self.current()?;
        current.check(Faults::OUTCOME, "the outcome")?;

        Ok(current.outcome.clone())
    }

    fn next_result(&mut self) -> Result<bool, BoxDynError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err("mock source was already closed".into());
        }

        if let Some(current) = self.results.front() {
            current.check(Faults::NEXT_RESULT, "the next result")?;
        }

        self.results.pop_front();

        Ok(!self.results.is_empty())
    }

    fn close(&mut self) -> Result<(), BoxDynError> {
        self.results.clear();
        self.closed.store(true, Ordering::SeqCst);

        if self.fail_on_close {
            return Err(Box::new(io::Error::other("mock failure while closing")));
        }

        Ok(())
    }
}
