use std::collections::VecDeque;
use std::sync::Arc;

use crate::column::Columns;
use crate::error::Result;
use crate::value::Value;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum CursorState {
    // nothing has been read for the current result
    Uninitialized,

    // column metadata is known, rows are being read
    Active,

    // the source reported the end of the rows
    Exhausted,
}

/// Position over the rows of the current result.
///
/// Rows read from the source but not yet delivered are kept in `buffer`. One-at-a-time
/// fetch, bulk fetch and iteration all take from the front of the same buffer, so a
/// row is handed out at most once.
#[derive(Debug)]
pub(crate) struct Cursor {
    state: CursorState,
    columns: Option<Arc<Columns>>,
    buffer: VecDeque<Vec<Value>>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { state: CursorState::Uninitialized, columns: None, buffer: VecDeque::new() }
    }
}

impl Cursor {
    pub(crate) const fn state(&self) -> CursorState {
        self.state
    }

    pub(crate) fn columns(&self) -> Option<&Arc<Columns>> {
        self.columns.as_ref()
    }

    // STATE: Uninitialized -> Active
    pub(crate) fn activate(&mut self, columns: Columns) {
        debug_assert_eq!(self.state, CursorState::Uninitialized);

        self.columns = Some(Arc::new(columns));
        self.state = CursorState::Active;
    }

    // STATE: * -> Exhausted
    pub(crate) fn exhaust(&mut self) {
        self.state = CursorState::Exhausted;
    }

    /// Buffers a row read from the source, after checking it against the column set.
    pub(crate) fn push(&mut self, values: Vec<Value>) -> Result<()> {
        let expected = self.columns.as_ref().map_or(0, |columns| columns.len());

        if values.len() != expected {
            return Err(err_protocol!(
                "received a row of {} fields for a result of {} columns",
                values.len(),
                expected
            ));
        }

        self.buffer.push_back(values);

        Ok(())
    }

    pub(crate) fn front(&self) -> Option<&Vec<Value>> {
        self.buffer.front()
    }

    pub(crate) fn pop_front(&mut self) -> Option<Vec<Value>> {
        self.buffer.pop_front()
    }

    pub(crate) fn buffered(&self) -> &VecDeque<Vec<Value>> {
        &self.buffer
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Vec<Value>> + '_ {
        self.buffer.drain(..)
    }

    /// Forgets the current result, returning how many rows were never delivered.
    pub(crate) fn reset(&mut self) -> usize {
        let discarded = self.buffer.len();
        *self = Self::default();

        discarded
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, CursorState};
    use crate::column::{ColumnDefinition, Columns};
    use crate::error::ErrorKind;
    use crate::type_info::Type;
    use crate::value::Value;

    fn cursor() -> anyhow::Result<Cursor> {
        let mut cursor = Cursor::default();
        cursor.activate(Columns::new(vec![
            ColumnDefinition::new("a", Type::Int.code()),
            ColumnDefinition::new("b", Type::Int.code()),
        ])?);

        Ok(cursor)
    }

    #[test]
    fn it_enforces_the_row_shape() -> anyhow::Result<()> {
        let mut cursor = cursor()?;
        assert_eq!(cursor.state(), CursorState::Active);

        cursor.push(vec![Value::Int(1), Value::Int(2)])?;

        let err = cursor.push(vec![Value::Int(1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProtocolInconsistency);

        // the rejected row was not buffered
        assert_eq!(cursor.buffered().len(), 1);

        Ok(())
    }

    #[test]
    fn it_resets() -> anyhow::Result<()> {
        let mut cursor = cursor()?;
        cursor.push(vec![Value::Int(1), Value::Int(2)])?;
        cursor.push(vec![Value::Int(3), Value::Int(4)])?;
        cursor.exhaust();

        assert_eq!(cursor.pop_front(), Some(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(cursor.reset(), 1);
        assert_eq!(cursor.state(), CursorState::Uninitialized);
        assert!(cursor.columns().is_none());

        Ok(())
    }
}
