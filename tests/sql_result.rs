use mysqlx::{ErrorKind, SqlResult, Type, Value, WarningLevel};
use mysqlx_test::{sql_result, table, MockResult};

// CALL p(), where `p` selects from two tables and then updates a third
fn procedure() -> SqlResult {
    sql_result([
        table(&[("id", Type::Int), ("name", Type::String)], (1..=3).map(|n: i64| {
            vec![Value::Int(n), Value::String(format!("user {n}"))]
        }))
        .warning(mysqlx::Warning::new(WarningLevel::Note, 1003, "first select")),
        table(&[("total", Type::Decimal)], [vec![Value::from("12.50")]]),
        MockResult::new()
            .affected_items(4)
            .warning(mysqlx::Warning::new(WarningLevel::Warning, 1265, "Data truncated")),
    ])
}

#[test]
fn it_walks_a_multi_result_sequence() -> anyhow::Result<()> {
    let mut result = procedure();

    assert!(result.has_data()?);
    assert_eq!(result.column_count()?, 2);
    assert_eq!(result.fetch_all()?.len(), 3);

    assert!(result.next_result()?);
    assert!(result.has_data()?);
    assert_eq!(result.column(0)?.column_label(), "total");
    assert_eq!(result.fetch_one()?.map(|row| row.try_get::<String, _>(0)).transpose()?.as_deref(), Some("12.50"));

    assert!(result.next_result()?);
    assert!(!result.has_data()?);
    assert_eq!(result.affected_rows_count()?, 4);
    assert_eq!(result.fetch_one().unwrap_err().kind(), ErrorKind::InvalidState);
    assert_eq!(result.column_count().unwrap_err().kind(), ErrorKind::InvalidState);

    assert!(!result.next_result()?);
    assert!(!result.has_data()?);
    assert!(!result.next_result()?);

    // warnings of every result in the sequence, in order
    let codes: Vec<u16> = result.warnings()?.iter().map(|w| w.code()).collect();
    assert_eq!(codes, [1003, 1265]);

    Ok(())
}

#[test]
fn next_result_discards_unread_rows() -> anyhow::Result<()> {
    let mut result = procedure();

    assert_eq!(result.fetch_one()?.map(|row| row.try_get::<i64, _>("id")).transpose()?, Some(1));

    assert!(result.next_result()?);

    // the next result is available from its start
    assert_eq!(result.count()?, 1);
    assert_eq!(result.fetch_all()?.len(), 1);

    Ok(())
}

#[test]
fn next_result_without_reading() -> anyhow::Result<()> {
    let mut result = procedure();

    assert!(result.next_result()?);
    assert!(result.next_result()?);
    assert!(!result.next_result()?);

    assert_eq!(result.warning_count()?, 2);
    assert_eq!(result.affected_items_count()?, 4);

    Ok(())
}

#[test]
fn a_single_result_without_data() -> anyhow::Result<()> {
    // UPDATE t SET v = v + 1
    let mut result = sql_result([MockResult::new().affected_items(12)]);

    assert!(!result.has_data()?);
    assert_eq!(result.affected_items_count()?, 12);
    assert_eq!(result.auto_increment_value()?, None);
    assert!(!result.next_result()?);

    Ok(())
}

#[test]
fn a_default_result_is_empty() -> anyhow::Result<()> {
    let mut result = SqlResult::default();

    assert!(!result.has_data()?);
    assert!(!result.next_result()?);
    assert_eq!(result.warning_count()?, 0);
    assert_eq!(result.fetch_one().unwrap_err().kind(), ErrorKind::InvalidState);

    let mut source = procedure();
    assert!(source.next_result()?);

    let mut moved = source.take();
    assert!(!source.has_data()?);
    assert!(moved.has_data()?);
    assert_eq!(moved.column_count()?, 1);

    Ok(())
}
