use mysqlx::{DbDoc, DocResult, ErrorKind, Type};
use mysqlx_test::{columns, doc_result, MockResult};
use serde_json::json;

fn books() -> MockResult {
    // books.find("year > 1950")
    MockResult::new()
        .columns(columns(&[("doc", Type::Json)]))
        .document(r#"{"_id": "b1", "title": "Dune", "year": 1965}"#)
        .document(r#"{"_id": "b2", "title": "Solaris", "year": 1961}"#)
        .document(r#"{"_id": "b3", "title": "Neuromancer", "year": 1984, "tags": ["cyberpunk"]}"#)
        .affected_items(0)
}

#[test]
fn it_fetches_documents() -> anyhow::Result<()> {
    let mut result = doc_result(books());

    assert_eq!(result.count()?, 3);

    let dune = result.fetch_one()?.expect("document");
    assert_eq!(dune.id(), Some("b1"));
    assert_eq!(dune.get("year"), Some(&json!(1965)));

    let rest: Vec<DbDoc> = (&mut result).into_iter().collect::<Result<_, _>>()?;
    let titles: Vec<&str> = rest.iter().filter_map(|doc| doc.get("title")?.as_str()).collect();
    assert_eq!(titles, ["Solaris", "Neuromancer"]);
    assert!(rest[1].has_field("tags"));

    assert_eq!(result.count()?, 0);
    assert!(result.fetch_one()?.is_none());
    assert!(result.fetch_all()?.is_empty());

    Ok(())
}

#[test]
fn count_does_not_consume() -> anyhow::Result<()> {
    let mut result = doc_result(books());

    assert_eq!(result.count()?, 3);
    assert_eq!(result.count()?, 3);
    assert_eq!(result.fetch_all()?.len(), 3);
    assert_eq!(result.count()?, 0);

    Ok(())
}

#[test]
fn documents_as_values() -> anyhow::Result<()> {
    let mut result = doc_result(
        MockResult::new()
            .columns(columns(&[("doc", Type::Document)]))
            .row(vec![mysqlx::Value::Document(DbDoc::try_from(json!({"_id": "x", "n": 1}))?)])
            .row(vec![mysqlx::Value::from(r#"{"_id": "y"}"#.as_bytes().to_vec())]),
    );

    let ids: Vec<Option<String>> = result
        .fetch_all()?
        .iter()
        .map(|doc| doc.id().map(str::to_owned))
        .collect();

    assert_eq!(ids, [Some("x".to_owned()), Some("y".to_owned())]);

    Ok(())
}

#[test]
fn a_result_without_data() {
    let mut result = doc_result(MockResult::new());

    assert_eq!(result.fetch_one().unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn a_default_result_is_empty() -> anyhow::Result<()> {
    let mut result = DocResult::default();

    assert_eq!(result.warning_count()?, 0);
    assert_eq!(result.fetch_one().unwrap_err().kind(), ErrorKind::InvalidState);
    assert_eq!(result.count().unwrap_err().kind(), ErrorKind::InvalidState);

    let mut source = doc_result(books());
    assert!(source.fetch_one()?.is_some());

    let mut moved = std::mem::take(&mut source);
    assert_eq!(source.fetch_all().unwrap_err().kind(), ErrorKind::InvalidState);
    assert_eq!(moved.count()?, 2);

    Ok(())
}
