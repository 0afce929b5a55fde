use crate::state::ResultState;

use super::{impl_outcome, impl_result, impl_rows};

/// The result of a `select` on a table: column metadata and rows.
///
/// ```rust,ignore
/// let mut result: RowResult = ...;
///
/// for row in &mut result {
///     let row = row?;
///     let name: String = row.try_get("name")?;
/// }
/// ```
#[derive(Debug, Default)]
pub struct RowResult {
    state: ResultState,
}

impl_result!(RowResult);
impl_outcome!(RowResult);
impl_rows!(RowResult);
