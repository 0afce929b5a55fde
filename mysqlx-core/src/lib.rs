//! Core of mysqlx: consuming the results of statements executed over the X Protocol.
//!
//! Not intended to be used directly; use the `mysqlx` crate. The code that executes
//! statements builds results through the [`source`] module.

#![warn(future_incompatible, rust_2018_idioms)]

#[macro_use]
pub mod error;

mod collation;
mod column;
mod cursor;
mod document;
mod logger;
mod options;
mod result;
mod row;
mod state;
mod type_info;
mod value;
mod warning;

pub mod source;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[doc(inline)]
pub use self::{
    collation::{CharacterSet, Collation, CollationCase},
    column::{Column, ColumnDefinition, ColumnFlags, Columns},
    document::{DbDoc, DocumentId, NotAnObjectError},
    error::{BoxDynError, Error, ErrorKind, Result, SharedSourceError, UnexpectedNullError},
    options::{LogSettings, ResultOptions},
    result::{DocResult, Docs, QueryResult, RowResult, Rows, SqlResult},
    row::{ColumnIndex, Row},
    source::{Outcome, ResultInit, ResultSource},
    type_info::Type,
    value::{Decode, Value},
    warning::{Warning, WarningLevel, Warnings},
};
