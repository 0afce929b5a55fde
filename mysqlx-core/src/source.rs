//! The boundary between result consumption and statement execution.
//!
//! The code that executes a statement (and owns the connection) implements
//! [`ResultSource`] over the reply of the server, wraps it in a [`ResultInit`], and
//! converts that into the result type matching the executed operation. Applications
//! never see this module: the `mysqlx` facade does not re-export it.
//!
//! All methods are blocking pulls. A source reports its faults as boxed errors; they
//! are normalized into [`Error`](crate::Error) by the result that pulled them.

use std::fmt::{self, Debug, Formatter};

use crate::column::ColumnDefinition;
use crate::document::DocumentId;
use crate::error::BoxDynError;
use crate::options::ResultOptions;
use crate::value::Value;
use crate::warning::Warning;

/// Outcome of a completed result, as reported by the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Number of items changed, deleted or inserted by the statement.
    pub affected_items: u64,

    /// The value generated for an `AUTO_INCREMENT` column, or `0` if none was generated.
    pub last_insert_id: u64,

    /// Identifiers of the documents added to a collection, in insertion order.
    pub document_ids: Vec<DocumentId>,
}

/// A live reply to an executed statement, consumed one result at a time.
///
/// The reply is a sequence of one or more results. Each result either carries data
/// (column metadata followed by rows) or only reports an outcome. The methods are
/// called in this order for every result of the sequence:
///
/// 1. [`has_data`](Self::has_data) once;
/// 2. if it returned `true`: [`columns`](Self::columns) once, then
///    [`next_row`](Self::next_row) until it returns `None`;
/// 3. [`next_warning`](Self::next_warning) until it returns `None`, then
///    [`outcome`](Self::outcome) once;
/// 4. [`next_result`](Self::next_result).
///
/// [`close`](Self::close) is called once when the result is released, at any point
/// of the sequence.
pub trait ResultSource: Send {
    /// Starts the current result and returns `true` if it carries rows.
    fn has_data(&mut self) -> Result<bool, BoxDynError>;

    /// Returns the column metadata of the current result.
    fn columns(&mut self) -> Result<Vec<ColumnDefinition>, BoxDynError>;

    /// Returns the fields of the next row of the current result, or `None` at its end.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>, BoxDynError>;

    /// Returns the next warning of the current result, or `None` once all were read.
    fn next_warning(&mut self) -> Result<Option<Warning>, BoxDynError>;

    /// Returns the outcome of the current result.
    fn outcome(&mut self) -> Result<Outcome, BoxDynError>;

    /// Discards whatever is left of the current result and moves to the next one.
    ///
    /// Returns `false` if there are no more results in the reply.
    fn next_result(&mut self) -> Result<bool, BoxDynError>;

    /// Discards everything that is left of the reply.
    ///
    /// The default implementation skips over all remaining results with
    /// [`next_result`](Self::next_result).
    fn close(&mut self) -> Result<(), BoxDynError> {
        while self.next_result()? {}

        Ok(())
    }
}

/// A handle to initialize a result from.
///
/// Every result type can be created from a `ResultInit` with [`From`].
pub struct ResultInit {
    pub(crate) source: Box<dyn ResultSource>,
    pub(crate) options: ResultOptions,
}

impl ResultInit {
    pub fn new(source: impl ResultSource + 'static) -> Self {
        Self { source: Box::new(source), options: ResultOptions::default() }
    }

    #[must_use]
    pub fn options(mut self, options: ResultOptions) -> Self {
        self.options = options;
        self
    }
}

impl Debug for ResultInit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultInit").field("options", &self.options).finish_non_exhaustive()
    }
}
