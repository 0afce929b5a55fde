use std::fmt::{self, Display, Formatter};
use std::slice;

use ahash::AHashMap;

use crate::collation::{CharacterSet, Collation};
use crate::error::{Error, Result};
use crate::type_info::Type;

bitflags::bitflags! {
    /// Column flags reported with the column metadata.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ColumnFlags: u16 {
        /// Field can't be `NULL`.
        const NOT_NULL = 1;

        /// Field is part of a primary key.
        const PRIMARY_KEY = 2;

        /// Field is part of a unique key.
        const UNIQUE_KEY = 4;

        /// Field is part of a multi-part unique or primary key.
        const MULTIPLE_KEY = 8;

        /// Field is unsigned.
        const UNSIGNED = 32;

        /// Field is zero filled.
        const ZEROFILL = 64;

        /// Field is an auto-increment field.
        const AUTO_INCREMENT = 512;

        /// Fixed-length `CHAR` or `BINARY` field, right-padded to its length.
        const RIGHT_PAD = 16384;
    }
}

/// Raw description of a column, as reported by a [`ResultSource`](crate::ResultSource).
///
/// The type is an unchecked code; it is validated when the column set of the
/// result is initialized.
#[derive(Debug, Clone, Default)]
pub struct ColumnDefinition {
    // NOTE: these fields are filled in by the result source and are semver-exempt
    #[doc(hidden)]
    pub schema: String,

    #[doc(hidden)]
    pub table: String,

    #[doc(hidden)]
    pub table_alias: String,

    #[doc(hidden)]
    pub name: String,

    #[doc(hidden)]
    pub alias: String,

    #[doc(hidden)]
    pub ty: u16,

    #[doc(hidden)]
    pub collation: u16,

    #[doc(hidden)]
    pub length: u32,

    #[doc(hidden)]
    pub fractional_digits: u16,

    #[doc(hidden)]
    pub flags: ColumnFlags,
}

impl ColumnDefinition {
    /// Describes a column named `name` (and labelled the same) of the given type code.
    pub fn new(name: impl Into<String>, ty: u16) -> Self {
        let name = name.into();

        Self { alias: name.clone(), name, ty, collation: Collation::BINARY.0, ..Self::default() }
    }

    #[must_use]
    pub fn origin(mut self, schema: impl Into<String>, table: impl Into<String>) -> Self {
        self.schema = schema.into();
        self.table = table.into();
        self.table_alias = self.table.clone();
        self
    }

    #[must_use]
    pub fn table_alias(mut self, alias: impl Into<String>) -> Self {
        self.table_alias = alias.into();
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    #[must_use]
    pub const fn collation(mut self, collation: Collation) -> Self {
        self.collation = collation.0;
        self
    }

    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub const fn fractional_digits(mut self, digits: u16) -> Self {
        self.fractional_digits = digits;
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: ColumnFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// Provides metadata for a single result column.
#[derive(Debug, Clone)]
pub struct Column {
    ordinal: usize,
    schema_name: String,
    table_name: String,
    table_label: String,
    name: String,
    label: String,
    ty: Type,
    length: u32,
    fractional_digits: u16,
    flags: ColumnFlags,
    collation: Collation,
}

impl Column {
    fn new(ordinal: usize, def: ColumnDefinition) -> Result<Self> {
        Ok(Self {
            ordinal,
            ty: Type::from_code(def.ty)?,
            schema_name: def.schema,
            table_name: def.table,
            table_label: def.table_alias,
            name: def.name,
            label: def.alias,
            length: def.length,
            fractional_digits: def.fractional_digits,
            flags: def.flags,
            collation: Collation(def.collation),
        })
    }

    /// Gets the column ordinal.
    ///
    /// This can be used to unambiguously refer to this column within a row in case more than
    /// one column have the same name
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Gets the table alias used in the query, or the table name if none was given.
    #[must_use]
    pub fn table_label(&self) -> &str {
        &self.table_label
    }

    /// Gets the original name of the column in its table.
    ///
    /// Empty if this column is an expression.
    #[must_use]
    pub fn column_name(&self) -> &str {
        &self.name
    }

    /// Gets the column alias, or its name if none was given.
    ///
    /// The label of an expression that has not been aliased is unreliable and
    /// can change between server versions.
    #[must_use]
    pub fn column_label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Gets the maximum length of data in the column in bytes, as reported by the server.
    ///
    /// Because the length is in bytes, it can be surprising with multi-byte character
    /// sets. For instance, with `utf8mb4` the length of a `VARCHAR(100)` column is
    /// reported as 400 because each character can take 4 bytes.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    #[must_use]
    pub const fn fractional_digits(&self) -> u16 {
        self.fractional_digits
    }

    /// Returns `true` if this is a numeric column that can hold negative values.
    #[must_use]
    pub const fn is_number_signed(&self) -> bool {
        self.ty.is_numeric() && !self.flags.contains(ColumnFlags::UNSIGNED)
    }

    /// Returns `true` if values are padded to the column length, either with zeros
    /// (`ZEROFILL`) or with spaces for fixed-length strings.
    #[must_use]
    pub const fn is_padded(&self) -> bool {
        self.flags.intersects(ColumnFlags::ZEROFILL.union(ColumnFlags::RIGHT_PAD))
    }

    #[must_use]
    pub const fn flags(&self) -> ColumnFlags {
        self.flags
    }

    #[must_use]
    pub const fn collation(&self) -> Collation {
        self.collation
    }

    #[must_use]
    pub fn collation_name(&self) -> Option<&'static str> {
        self.collation.name()
    }

    #[must_use]
    pub fn character_set(&self) -> Option<CharacterSet> {
        self.collation.character_set()
    }

    #[must_use]
    pub fn character_set_name(&self) -> Option<&'static str> {
        self.character_set().map(CharacterSet::name)
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.table_label.is_empty() {
            write!(f, "{}.", self.table_label)?;
        }

        write!(f, "{} {}", self.label, self.ty)?;

        if self.ty.is_numeric() && !self.is_number_signed() {
            f.write_str(" UNSIGNED")?;
        }

        if self.ty.is_string() {
            write!(f, " COLLATE {}", self.collation)?;
        }

        Ok(())
    }
}

/// The ordered metadata of all columns of a tabular result.
///
/// The set is fixed once the result starts: it neither grows nor shrinks, so
/// iterating it again yields the same columns in the same order.
#[derive(Debug, Default)]
pub struct Columns {
    columns: Vec<Column>,
    labels: AHashMap<String, usize>,
}

impl Columns {
    pub(crate) fn new(definitions: Vec<ColumnDefinition>) -> Result<Self> {
        let mut labels = AHashMap::with_capacity(definitions.len());

        let columns = definitions
            .into_iter()
            .enumerate()
            .map(|(ordinal, def)| {
                // the first column with a given label wins, like the server does
                // for an ambiguous `ORDER BY`
                labels.entry(def.alias.clone()).or_insert(ordinal);
                Column::new(ordinal, def)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns, labels })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the metadata of the column at the given, 0-based position.
    pub fn get(&self, index: usize) -> Result<&Column> {
        self.columns.get(index).ok_or(Error::ColumnIndexOutOfBounds { index, len: self.len() })
    }

    /// Returns the position of the first column with the given label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    pub fn iter(&self) -> slice::Iter<'_, Column> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnDefinition, ColumnFlags, Columns};
    use crate::collation::{CharacterSet, Collation};
    use crate::error::ErrorKind;
    use crate::type_info::Type;

    fn definitions() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", Type::BigInt.code())
                .origin("test", "users")
                .table_alias("u")
                .flags(ColumnFlags::UNSIGNED | ColumnFlags::PRIMARY_KEY)
                .length(20),
            ColumnDefinition::new("name", Type::String.code())
                .origin("test", "users")
                .alias("username")
                .collation(Collation::UTF8MB4_0900_AI_CI)
                .length(400),
            ColumnDefinition::new("score", Type::Decimal.code()).fractional_digits(2),
        ]
    }

    #[test]
    fn it_describes_columns() -> anyhow::Result<()> {
        let columns = Columns::new(definitions())?;
        assert_eq!(columns.len(), 3);

        let id = columns.get(0)?;
        assert_eq!(id.ordinal(), 0);
        assert_eq!(id.schema_name(), "test");
        assert_eq!(id.table_name(), "users");
        assert_eq!(id.table_label(), "u");
        assert_eq!(id.ty(), Type::BigInt);
        assert!(!id.is_number_signed());
        assert_eq!(id.character_set(), Some(CharacterSet::Binary));
        assert_eq!(id.to_string(), "u.id BIGINT UNSIGNED");

        let name = columns.get(1)?;
        assert_eq!(name.column_name(), "name");
        assert_eq!(name.column_label(), "username");
        assert_eq!(name.length(), 400);
        assert!(!name.is_number_signed());
        assert_eq!(name.character_set_name(), Some("utf8mb4"));
        assert_eq!(name.collation_name(), Some("utf8mb4_0900_ai_ci"));

        let score = columns.get(2)?;
        assert_eq!(score.fractional_digits(), 2);
        assert!(score.is_number_signed());
        assert!(!score.is_padded());

        Ok(())
    }

    #[test]
    fn it_reports_out_of_range() -> anyhow::Result<()> {
        let columns = Columns::new(definitions())?;
        let err = columns.get(3).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(err.to_string(), "column index out of bounds: the len is 3, but the index is 3");

        Ok(())
    }

    #[test]
    fn it_iterates_repeatedly() -> anyhow::Result<()> {
        let columns = Columns::new(definitions())?;

        let first: Vec<&str> = columns.iter().map(|c| c.column_label()).collect();
        let second: Vec<&str> = (&columns).into_iter().map(|c| c.column_label()).collect();

        assert_eq!(first, ["id", "username", "score"]);
        assert_eq!(first, second);

        assert_eq!(columns.find("username"), Some(1));
        assert_eq!(columns.find("name"), None);

        Ok(())
    }

    #[test]
    fn it_rejects_unknown_types() {
        let err = Columns::new(vec![ColumnDefinition::new("x", 99)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProtocolInconsistency);
    }
}
