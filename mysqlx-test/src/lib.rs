use log::LevelFilter;
use mysqlx_core::{DocResult, QueryResult, ResultInit, ResultOptions, RowResult, SqlResult, Type};

pub use mysqlx_core::mock::{MockResult, MockSource};
pub use mysqlx_core::ColumnDefinition;

pub fn setup_if_needed() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Wrap a scripted source the way an executed statement would
// Ensure [env_logger] has been setup
pub fn init(source: MockSource) -> ResultInit {
    setup_if_needed();

    ResultInit::new(source).options(
        ResultOptions::new().log_results(LevelFilter::Trace).log_warnings(LevelFilter::Debug),
    )
}

pub fn query_result(result: MockResult) -> QueryResult {
    QueryResult::from(init(MockSource::new().result(result)))
}

pub fn row_result(result: MockResult) -> RowResult {
    RowResult::from(init(MockSource::new().result(result)))
}

pub fn doc_result(result: MockResult) -> DocResult {
    DocResult::from(init(MockSource::new().result(result)))
}

pub fn sql_result(results: impl IntoIterator<Item = MockResult>) -> SqlResult {
    let source = results.into_iter().fold(MockSource::new(), MockSource::result);

    SqlResult::from(init(source))
}

/// Column definitions from `(label, type)` pairs.
pub fn columns(columns: &[(&str, Type)]) -> Vec<ColumnDefinition> {
    columns.iter().map(|&(name, ty)| ColumnDefinition::new(name, ty.code())).collect()
}

/// A result with data where every row holds the given values.
pub fn table<V>(columns: &[(&str, Type)], rows: impl IntoIterator<Item = V>) -> MockResult
where
    V: IntoIterator,
    V::Item: Into<mysqlx_core::Value>,
{
    MockResult::new()
        .columns(self::columns(columns))
        .rows(rows.into_iter().map(|row| row.into_iter().map(Into::into).collect()))
}
