use crate::document::DocumentId;
use crate::error::{Error, Result};
use crate::state::ResultState;

use super::{impl_outcome, impl_result};

/// The result of a statement that only reports an outcome, such as adding documents
/// to a collection or inserting rows into a table.
#[derive(Debug, Default)]
pub struct QueryResult {
    state: ResultState,
}

impl_result!(QueryResult);
impl_outcome!(QueryResult);

impl QueryResult {
    /// Returns the identifier of the single document added by the statement.
    ///
    /// Reports [`Error::NotApplicable`] when the statement added no document, or more
    /// than one; use [`document_ids`](Self::document_ids) for the latter.
    pub fn document_id(&mut self) -> Result<&DocumentId> {
        match self.state.outcome()?.document_ids.as_slice() {
            [id] => Ok(id),
            [] => Err(Error::NotApplicable("no document was added")),
            _ => Err(Error::NotApplicable(
                "more than one document was added; use `document_ids` instead",
            )),
        }
    }

    /// Returns the identifiers of all documents added by the statement, in the order
    /// they were added.
    pub fn document_ids(&mut self) -> Result<&[DocumentId]> {
        Ok(&self.state.outcome()?.document_ids)
    }
}
