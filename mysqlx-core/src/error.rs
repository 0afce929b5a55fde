//! Types for working with errors produced by mysqlx.

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::result::Result as StdResult;
use std::sync::Arc;

/// A specialized `Result` type for mysqlx.
pub type Result<T, E = Error> = StdResult<T, E>;

/// A type-erased error, as reported by a [`ResultSource`](crate::ResultSource).
pub type BoxDynError = Box<dyn StdError + 'static + Send + Sync>;

/// An unexpected `NULL` was encountered during decoding.
///
/// Returned from [`Row::try_get`](crate::Row::try_get) if the value is `NULL`
/// and you are not decoding into an `Option`.
#[derive(thiserror::Error, Debug)]
#[error("unexpected null; try decoding as an `Option`")]
pub struct UnexpectedNullError;

/// A fault of the result source, kept by the result that observed it.
///
/// A result that fails while reading from its source reports the same fault again on
/// every later read. Each report wraps the original error, which can still be
/// inspected with [`get_ref`](Self::get_ref).
///
/// ```rust,ignore
/// if let Error::Source(err) = &err {
///     if let Some(shared) = err.downcast_ref::<SharedSourceError>() {
///         let io = shared.get_ref().downcast_ref::<io::Error>();
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SharedSourceError(Arc<BoxDynError>);

impl SharedSourceError {
    pub(crate) fn new(error: BoxDynError) -> Self {
        Self(Arc::new(error))
    }

    /// Returns the error reported by the source.
    #[must_use]
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &**self.0
    }
}

impl Display for SharedSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&**self.0, f)
    }
}

impl StdError for SharedSourceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Represents all the ways a method can fail within mysqlx.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Column index was out of bounds.
    #[error("column index out of bounds: the len is {len}, but the index is {index}")]
    ColumnIndexOutOfBounds { index: usize, len: usize },

    /// Warning index was out of bounds.
    #[error("warning index out of bounds: the len is {len}, but the index is {index}")]
    WarningIndexOutOfBounds { index: usize, len: usize },

    /// No column found for the given name.
    #[error("no column found for name: {0}")]
    ColumnNotFound(String),

    /// The result is empty: it was default-constructed or its contents were moved out.
    #[error("attempted to use an empty result")]
    Empty,

    /// The current result does not carry any rows or documents.
    ///
    /// This usually means row accessors were called on the result of a statement
    /// such as `UPDATE` which only reports an outcome.
    #[error("the current result has no data")]
    NoData,

    /// The requested outcome does not apply to the executed command.
    #[error("not applicable to this result: {0}")]
    NotApplicable(&'static str),

    /// Unexpected or invalid data encountered while consuming the result.
    ///
    /// This indicates a mismatch between the library and the server (for example an
    /// unknown column type code) and is not recoverable for the result that reported it.
    #[error("encountered unexpected or invalid data: {0}")]
    Protocol(String),

    /// Error reported by the execution or transport layer while pulling data.
    #[error("error reported by the result source: {0}")]
    Source(#[source] BoxDynError),

    /// Error occurred while decoding a value from a specific column.
    #[error("error occurred while decoding column {index}: {source}")]
    ColumnDecode {
        index: String,

        #[source]
        source: BoxDynError,
    },
}

/// The broad category of an [`Error`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An index or position exceeds the current bounds.
    OutOfRange,

    /// The operation is not valid for the current state of the result.
    InvalidState,

    /// The result source reported a value outside of the recognized domain.
    ProtocolInconsistency,

    /// A fault surfaced by the execution or transport layer.
    Propagated,

    /// A field value could not be converted to the requested Rust type.
    Decode,
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ColumnIndexOutOfBounds { .. }
            | Self::WarningIndexOutOfBounds { .. }
            | Self::ColumnNotFound(_) => ErrorKind::OutOfRange,

            Self::Empty | Self::NoData | Self::NotApplicable(_) => ErrorKind::InvalidState,

            Self::Protocol(_) => ErrorKind::ProtocolInconsistency,

            Self::Source(_) => ErrorKind::Propagated,

            Self::ColumnDecode { .. } => ErrorKind::Decode,
        }
    }

    /// Normalizes a fault reported by a [`ResultSource`](crate::ResultSource).
    ///
    /// A source may report a mysqlx [`Error`] itself (for example a protocol
    /// inconsistency it detected while decoding); that error keeps its kind.
    pub(crate) fn from_source(err: BoxDynError) -> Self {
        match err.downcast::<Self>() {
            Ok(err) => *err,
            Err(err) => Self::Source(err),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OutOfRange => "out of range",
            Self::InvalidState => "invalid state",
            Self::ProtocolInconsistency => "protocol inconsistency",
            Self::Propagated => "propagated",
            Self::Decode => "decode",
        })
    }
}

// Format an error message as a `Protocol` error
macro_rules! err_protocol {
    ($expr:expr) => {
        $crate::error::Error::Protocol($expr.into())
    };

    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::Error::Protocol(format!($fmt, $($arg)*))
    };
}
