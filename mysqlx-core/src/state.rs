use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::column::Columns;
use crate::cursor::{Cursor, CursorState};
use crate::error::{Error, Result, SharedSourceError};
use crate::logger::{ResultLogger, TARGET};
use crate::options::LogSettings;
use crate::row::Row;
use crate::source::{Outcome, ResultInit, ResultSource};
use crate::value::Value;
use crate::warning::Warnings;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    // the source has not been asked about the current result yet
    Pending,

    // started; rows, warnings or the outcome may still be unread
    Active,

    // warnings and outcome of the current result were read
    Complete,

    // there are no more results in the sequence
    Finished,
}

// a fault that leaves the reply in an unknown state; reported again on every later pull
#[derive(Debug, Clone)]
enum Fault {
    Protocol(String),
    Source(SharedSourceError),
}

impl Fault {
    fn to_error(&self) -> Error {
        match self {
            Self::Protocol(message) => Error::Protocol(message.clone()),
            Self::Source(error) => Error::Source(Box::new(error.clone())),
        }
    }
}

/// The state shared by every kind of result: the source it pulls from, the cursor over
/// the current result, the accumulated warnings and the last outcome.
pub(crate) struct ResultState {
    source: Option<Box<dyn ResultSource>>,
    phase: Phase,
    has_data: bool,
    cursor: Cursor,
    warnings: Warnings,
    outcome: Outcome,
    logger: ResultLogger,
    fault: Option<Fault>,
}

impl Default for ResultState {
    fn default() -> Self {
        Self {
            source: None,
            phase: Phase::Finished,
            has_data: false,
            cursor: Cursor::default(),
            warnings: Warnings::default(),
            outcome: Outcome::default(),
            logger: ResultLogger::new(LogSettings::default()),
            fault: None,
        }
    }
}

impl From<ResultInit> for ResultState {
    fn from(init: ResultInit) -> Self {
        let mut state = Self::default();

        state.source = Some(init.source);
        state.phase = Phase::Pending;
        state.logger = ResultLogger::new(init.options.log_settings);

        state
    }
}

// Returns the source to pull from, or the fault that stopped an earlier pull.
fn live<'a>(
    source: &'a mut Option<Box<dyn ResultSource>>,
    fault: &Option<Fault>,
) -> Result<&'a mut (dyn ResultSource + 'static)> {
    if let Some(fault) = fault {
        return Err(fault.to_error());
    }

    source.as_deref_mut().ok_or(Error::Empty)
}

// The columns of the current result are missing; only a recorded fault leaves them unread.
fn missing_columns(fault: &Option<Fault>) -> Error {
    fault.as_ref().map_or_else(
        || err_protocol!("the columns of the current result were not read"),
        Fault::to_error,
    )
}

impl ResultState {
    fn record(&mut self, error: Error) -> Error {
        let fault = match error {
            Error::Protocol(message) => Fault::Protocol(message),

            Error::Source(source) => Fault::Source(match source.downcast::<SharedSourceError>() {
                Ok(shared) => *shared,
                Err(source) => SharedSourceError::new(source),
            }),

            other => return other,
        };

        let error = fault.to_error();
        self.fault = Some(fault);

        error
    }

    // STATE: Pending -> Active
    fn start(&mut self) -> Result<()> {
        if self.phase != Phase::Pending {
            return Ok(());
        }

        let source = live(&mut self.source, &self.fault)?;

        let has_data = match source.has_data() {
            Ok(has_data) => has_data,
            Err(error) => return Err(self.record(Error::from_source(error))),
        };

        // the source moves on to the rows with the first call, so the
        // result is started even if reading the columns fails below
        self.phase = Phase::Active;
        self.has_data = has_data;

        if !has_data {
            self.cursor.exhaust();
            return Ok(());
        }

        let columns = source
            .columns()
            .map_err(Error::from_source)
            .and_then(Columns::new);

        match columns {
            Ok(columns) => {
                self.cursor.activate(columns);
                Ok(())
            }

            Err(error) => Err(self.record(error)),
        }
    }

    /// Returns `true` if the current result carries rows.
    pub(crate) fn has_data(&mut self) -> Result<bool> {
        if self.source.is_none() {
            return Ok(false);
        }

        self.start()?;

        Ok(self.has_data)
    }

    fn require_data(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(Error::Empty);
        }

        self.start()?;

        if self.has_data { Ok(()) } else { Err(Error::NoData) }
    }

    pub(crate) fn columns(&mut self) -> Result<&Arc<Columns>> {
        self.require_data()?;

        let fault = &self.fault;
        self.cursor.columns().ok_or_else(|| missing_columns(fault))
    }

    // reads one row from the source into the buffer; returns `false` at the end of the rows
    fn pull(&mut self) -> Result<bool> {
        if let Some(fault) = &self.fault {
            return Err(fault.to_error());
        }

        match self.cursor.state() {
            CursorState::Active => {}
            CursorState::Exhausted => return Ok(false),
            CursorState::Uninitialized => return Err(missing_columns(&self.fault)),
        }

        let source = live(&mut self.source, &self.fault)?;

        match source.next_row() {
            Ok(Some(values)) => {
                if let Err(error) = self.cursor.push(values) {
                    return Err(self.record(error));
                }

                self.logger.increment_rows_read();

                Ok(true)
            }

            Ok(None) => {
                self.cursor.exhaust();

                Ok(false)
            }

            Err(error) => Err(self.record(Error::from_source(error))),
        }
    }

    // reads the remaining rows of the current result from the source and drops them
    fn skip(&mut self) -> Result<usize> {
        let mut skipped = 0;

        while self.cursor.state() == CursorState::Active {
            let source = live(&mut self.source, &self.fault)?;

            match source.next_row() {
                Ok(Some(_)) => {
                    self.logger.increment_rows_read();
                    skipped += 1;
                }

                Ok(None) => self.cursor.exhaust(),

                Err(error) => return Err(self.record(Error::from_source(error))),
            }
        }

        Ok(skipped)
    }

    fn buffer_all(&mut self) -> Result<()> {
        self.require_data()?;

        while self.pull()? {}

        Ok(())
    }

    /// Returns the next undelivered row without moving past it.
    pub(crate) fn peek_row(&mut self) -> Result<Option<&[Value]>> {
        self.require_data()?;

        if self.cursor.front().is_none() {
            self.pull()?;
        }

        Ok(self.cursor.front().map(Vec::as_slice))
    }

    /// Moves past the row returned by the last [`peek_row`](Self::peek_row).
    pub(crate) fn advance(&mut self) {
        // the row itself was already handed out
        self.cursor.pop_front();
    }

    pub(crate) fn next_row(&mut self) -> Result<Option<Row>> {
        self.require_data()?;

        if self.cursor.front().is_none() {
            self.pull()?;
        }

        let Some(columns) = self.cursor.columns() else {
            return Ok(None);
        };

        let columns = Arc::clone(columns);

        Ok(self.cursor.pop_front().map(|values| Row::new(values, columns)))
    }

    /// Reads every remaining row of the current result and returns them without
    /// moving past them.
    pub(crate) fn remaining(&mut self) -> Result<&VecDeque<Vec<Value>>> {
        self.buffer_all()?;

        Ok(self.cursor.buffered())
    }

    /// Moves past every row returned by the last [`remaining`](Self::remaining).
    pub(crate) fn take_remaining(&mut self) -> Vec<Vec<Value>> {
        self.cursor.drain().collect()
    }

    pub(crate) fn fetch_all(&mut self) -> Result<Vec<Row>> {
        self.buffer_all()?;

        let Some(columns) = self.cursor.columns().map(Arc::clone) else {
            return Ok(Vec::new());
        };

        Ok(self.cursor.drain().map(|values| Row::new(values, Arc::clone(&columns))).collect())
    }

    pub(crate) fn count(&mut self) -> Result<usize> {
        Ok(self.remaining()?.len())
    }

    // STATE: Active -> Complete
    fn complete(&mut self) -> Result<()> {
        self.start()?;

        if self.phase != Phase::Active {
            return Ok(());
        }

        // rows stay available to the application
        while self.pull()? {}

        let before = self.warnings.len();

        loop {
            let source = live(&mut self.source, &self.fault)?;

            match source.next_warning() {
                Ok(Some(warning)) => {
                    self.logger.warning(&warning);
                    self.warnings.push(warning);
                }

                Ok(None) => break,

                Err(error) => return Err(self.record(Error::from_source(error))),
            }
        }

        let source = live(&mut self.source, &self.fault)?;

        self.outcome = match source.outcome() {
            Ok(outcome) => outcome,
            Err(error) => return Err(self.record(Error::from_source(error))),
        };

        self.logger.finish(self.outcome.affected_items, self.warnings.len() - before);
        self.phase = Phase::Complete;

        Ok(())
    }

    pub(crate) fn warnings(&mut self) -> Result<&Warnings> {
        self.complete()?;

        Ok(&self.warnings)
    }

    pub(crate) fn outcome(&mut self) -> Result<&Outcome> {
        self.complete()?;

        Ok(&self.outcome)
    }

    // STATE: * -> Pending | Finished
    pub(crate) fn next_result(&mut self) -> Result<bool> {
        if self.source.is_none() || self.phase == Phase::Finished {
            return Ok(false);
        }

        self.start()?;

        let discarded = self.cursor.buffered().len() + self.skip()?;
        self.complete()?;
        self.logger.discarded(discarded);

        let source = live(&mut self.source, &self.fault)?;

        let more = match source.next_result() {
            Ok(more) => more,
            Err(error) => return Err(self.record(Error::from_source(error))),
        };

        self.cursor.reset();
        self.has_data = false;

        if more {
            self.phase = Phase::Pending;
            self.logger.next_result();
        } else {
            self.phase = Phase::Finished;
        }

        Ok(more)
    }
}

impl Drop for ResultState {
    fn drop(&mut self) {
        let Some(mut source) = self.source.take() else {
            return;
        };

        self.logger.discarded(self.cursor.reset());

        if let Err(error) = source.close() {
            tracing::warn!(target: TARGET, %error, "failed to release result");
        }
    }
}

impl Debug for ResultState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultState")
            .field("empty", &self.source.is_none())
            .field("phase", &self.phase)
            .field("has_data", &self.has_data)
            .field("buffered", &self.cursor.buffered().len())
            .field("warnings", &self.warnings.len())
            .field("outcome", &self.outcome)
            .field("fault", &self.fault)
            .finish()
    }
}
