use crate::error::Result;
use crate::state::ResultState;

use super::{impl_outcome, impl_result, impl_rows};

/// The result of a SQL statement.
///
/// A SQL statement (such as a call to a stored procedure) can produce a sequence of
/// results. Rows, columns and the outcome refer to the current result of the
/// sequence; use [`next_result`](Self::next_result) to move on to the next one.
/// Warnings are collected across the whole sequence.
///
/// ```rust,ignore
/// let mut result: SqlResult = ...;
///
/// loop {
///     if result.has_data()? {
///         for row in &mut result {
///             println!("{:?}", row?);
///         }
///     }
///
///     if !result.next_result()? {
///         break;
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct SqlResult {
    state: ResultState,
}

impl_result!(SqlResult);
impl_outcome!(SqlResult);
impl_rows!(SqlResult);

impl SqlResult {
    /// Returns `true` if the current result carries rows.
    ///
    /// Returns `false` for statements that only report an outcome, once the sequence
    /// is finished, and for an empty result.
    pub fn has_data(&mut self) -> Result<bool> {
        self.state.has_data()
    }

    /// Moves on to the next result of the sequence.
    ///
    /// Rows of the current result that were not fetched are discarded. Returns `false`
    /// if there are no more results.
    pub fn next_result(&mut self) -> Result<bool> {
        self.state.next_result()
    }

    /// Same as [`affected_items_count`](Self::affected_items_count).
    pub fn affected_rows_count(&mut self) -> Result<u64> {
        self.affected_items_count()
    }
}

#[cfg(test)]
mod tests {
    use super::SqlResult;
    use crate::column::ColumnDefinition;
    use crate::error::Error;
    use crate::mock::{MockResult, MockSource};
    use crate::source::ResultInit;
    use crate::type_info::Type;
    use crate::value::Value;
    use crate::warning::{Warning, WarningLevel};

    fn call() -> SqlResult {
        // e.g. `CALL report()` selecting twice, then reporting the call itself
        let source = MockSource::new()
            .result(
                MockResult::new()
                    .columns(vec![ColumnDefinition::new("a", Type::Int.code())])
                    .rows((1..=4).map(|n| vec![Value::Int(n)]))
                    .warning(Warning::new(WarningLevel::Note, 1, "first")),
            )
            .result(
                MockResult::new()
                    .columns(vec![
                        ColumnDefinition::new("b", Type::String.code()),
                        ColumnDefinition::new("c", Type::Double.code()),
                    ])
                    .row(vec![Value::from("x"), Value::Double(0.5)])
                    .warning(Warning::new(WarningLevel::Note, 2, "second")),
            )
            .result(MockResult::new().affected_items(5));

        SqlResult::from(ResultInit::new(source))
    }

    #[test]
    fn it_walks_the_sequence() -> anyhow::Result<()> {
        let mut result = call();

        assert!(result.has_data()?);
        assert_eq!(result.column_count()?, 1);
        assert!(result.fetch_one()?.is_some());

        assert!(result.next_result()?);
        assert!(result.has_data()?);
        assert_eq!(result.column_count()?, 2);
        assert_eq!(result.column(0)?.column_name(), "b");
        assert_eq!(result.count()?, 1);

        assert!(result.next_result()?);
        assert!(!result.has_data()?);
        assert_eq!(result.affected_rows_count()?, 5);
        assert!(matches!(result.fetch_one(), Err(Error::NoData)));

        assert!(!result.next_result()?);
        assert!(!result.has_data()?);

        // the outcome of the last result is kept
        assert_eq!(result.affected_items_count()?, 5);

        Ok(())
    }

    #[test]
    fn warnings_accumulate_across_results() -> anyhow::Result<()> {
        let mut result = call();

        assert_eq!(result.warning_count()?, 1);
        assert!(result.next_result()?);
        assert_eq!(result.warning_count()?, 2);
        assert_eq!(result.warning(0)?.message(), "first");
        assert_eq!(result.warning(1)?.message(), "second");

        Ok(())
    }

    #[test]
    fn outcome_is_per_result() -> anyhow::Result<()> {
        let mut result = call();

        assert_eq!(result.affected_items_count()?, 0);

        // reading the outcome did not consume the rows
        assert_eq!(result.count()?, 4);

        assert!(result.next_result()?);
        assert!(result.next_result()?);
        assert_eq!(result.affected_items_count()?, 5);

        Ok(())
    }

    #[test]
    fn an_empty_result_has_no_sequence() -> anyhow::Result<()> {
        let mut result = SqlResult::default();

        assert!(!result.has_data()?);
        assert!(!result.next_result()?);
        assert!(matches!(result.columns(), Err(Error::Empty)));

        Ok(())
    }
}
