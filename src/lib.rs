#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("lib.md")]

pub use mysqlx_core::error::{
    self, BoxDynError, Error, ErrorKind, Result, SharedSourceError, UnexpectedNullError,
};

// Results
pub use mysqlx_core::{DocResult, Docs, QueryResult, RowResult, Rows, SqlResult};

// Data
pub use mysqlx_core::{ColumnIndex, DbDoc, Decode, DocumentId, NotAnObjectError, Row, Value};

// Metadata
pub use mysqlx_core::{
    CharacterSet, Collation, CollationCase, Column, ColumnFlags, Columns, Type, Warning,
    WarningLevel, Warnings,
};

// Configuration
pub use mysqlx_core::{LogSettings, ResultOptions};
