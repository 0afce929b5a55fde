use crate::document::DbDoc;
use crate::error::Result;
use crate::state::ResultState;

use super::{impl_outcome, impl_result};

/// The result of a `find` on a collection: a sequence of documents.
#[derive(Debug, Default)]
pub struct DocResult {
    state: ResultState,
}

impl_result!(DocResult);
impl_outcome!(DocResult);

// a document that fails to convert stays the next one to fetch
fn next_doc(state: &mut ResultState) -> Result<Option<DbDoc>> {
    let doc = match state.peek_row()? {
        Some(values) => DbDoc::from_row_values(values)?,
        None => return Ok(None),
    };

    state.advance();

    Ok(Some(doc))
}

impl DocResult {
    /// Fetches the next document, or returns `None` once all documents were fetched.
    pub fn fetch_one(&mut self) -> Result<Option<DbDoc>> {
        next_doc(&mut self.state)
    }

    /// Fetches all documents that were not fetched yet.
    ///
    /// If any of them cannot be read, none are fetched.
    pub fn fetch_all(&mut self) -> Result<Vec<DbDoc>> {
        let docs = self
            .state
            .remaining()?
            .iter()
            .map(|values| DbDoc::from_row_values(values))
            .collect::<Result<Vec<_>>>()?;

        drop(self.state.take_remaining());

        Ok(docs)
    }

    /// Returns the number of documents that were not fetched yet.
    pub fn count(&mut self) -> Result<usize> {
        self.state.count()
    }

    /// Iterates over the documents that were not fetched yet.
    pub fn iter(&mut self) -> Docs<'_> {
        Docs { state: &mut self.state, done: false }
    }
}

impl<'r> IntoIterator for &'r mut DocResult {
    type Item = Result<DbDoc>;
    type IntoIter = Docs<'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the remaining documents of a [`DocResult`].
///
/// After an error, the iterator ends.
#[derive(Debug)]
pub struct Docs<'r> {
    state: &'r mut ResultState,
    done: bool,
}

impl Iterator for Docs<'_> {
    type Item = Result<DbDoc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = next_doc(self.state).transpose();

        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::DocResult;
    use crate::column::ColumnDefinition;
    use crate::error::{Error, ErrorKind};
    use crate::mock::{MockResult, MockSource};
    use crate::source::ResultInit;
    use crate::type_info::Type;

    fn docs() -> MockResult {
        MockResult::new()
            .columns(vec![ColumnDefinition::new("doc", Type::Json.code())])
            .document(r#"{"_id": "1", "name": "ada"}"#)
            .document(r#"{"_id": "2", "name": "grace"}"#)
            .document(r#"{"_id": "3", "name": "edsger"}"#)
    }

    fn doc_result(result: MockResult) -> DocResult {
        DocResult::from(ResultInit::new(MockSource::new().result(result)))
    }

    #[test]
    fn it_fetches_documents() -> anyhow::Result<()> {
        let mut result = doc_result(docs());

        assert_eq!(result.count()?, 3);

        let first = result.fetch_one()?;
        assert_eq!(first.as_ref().and_then(|doc| doc.id()), Some("1"));
        assert_eq!(result.count()?, 2);

        let second = result.iter().next().transpose()?;
        assert_eq!(second.as_ref().and_then(|doc| doc.get("name")).and_then(|v| v.as_str()), Some("grace"));

        let rest = result.fetch_all()?;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id(), Some("3"));

        assert!(result.fetch_one()?.is_none());
        assert!(result.fetch_all()?.is_empty());

        Ok(())
    }

    #[test]
    fn a_bad_document_is_not_skipped() -> anyhow::Result<()> {
        let mut result = doc_result(
            MockResult::new()
                .columns(vec![ColumnDefinition::new("doc", Type::Json.code())])
                .document(r#"{"_id": "1"}"#)
                .document("[1, 2]"),
        );

        assert!(result.fetch_one()?.is_some());

        let err = result.fetch_one().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProtocolInconsistency);
        assert_eq!(result.count()?, 1);

        assert!(result.fetch_all().is_err());
        assert_eq!(result.count()?, 1);

        Ok(())
    }

    #[test]
    fn documents_of_an_empty_result() -> anyhow::Result<()> {
        let mut result = DocResult::default();

        assert_eq!(result.warning_count()?, 0);
        assert!(matches!(result.fetch_one(), Err(Error::Empty)));
        assert!(matches!(result.iter().next(), Some(Err(Error::Empty))));

        let mut result = doc_result(docs());
        let mut moved = result.take();

        assert!(matches!(result.fetch_all(), Err(Error::Empty)));
        assert_eq!(moved.count()?, 3);

        Ok(())
    }
}
