use std::fmt::{self, Display, Formatter};
use std::slice;

use crate::error::{Error, Result};

/// Severity of a [`Warning`] reported by the server.
///
/// <https://dev.mysql.com/doc/dev/mysql-server/latest/mysqlx__notice_8proto.html>
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum WarningLevel {
    Note = 1,
    Warning = 2,
    Error = 3,
}

impl WarningLevel {
    /// Returns the level for the numeric severity sent by the server.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::Note),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Error),
            _ => Err(err_protocol!("unknown warning level: {}", code)),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl Display for WarningLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A warning, note or error reported by the server while executing a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warning {
    level: WarningLevel,
    code: u16,
    message: String,
}

impl Warning {
    pub fn new(level: WarningLevel, code: u16, message: impl Into<String>) -> Self {
        Self { level, code, message: message.into() }
    }

    #[must_use]
    pub const fn level(&self) -> WarningLevel {
        self.level
    }

    /// The server error code, for example `1365` for a division by zero.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.level, self.code, self.message)
    }
}

/// The warnings attached to a result, in the order the server emitted them.
///
/// Warnings are only ever appended, so the index of a warning does not change
/// for the lifetime of the result.
#[derive(Debug, Default)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    pub(crate) fn push(&mut self, warning: Warning) {
        self.0.push(warning);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the warning at the given, 0-based position.
    pub fn get(&self, index: usize) -> Result<&Warning> {
        self.0.get(index).ok_or(Error::WarningIndexOutOfBounds { index, len: self.0.len() })
    }

    pub fn iter(&self) -> slice::Iter<'_, Warning> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Warning, WarningLevel, Warnings};
    use crate::error::ErrorKind;

    #[test]
    fn it_indexes_in_emitted_order() {
        let mut warnings = Warnings::default();
        warnings.push(Warning::new(WarningLevel::Warning, 1365, "Division by 0"));
        warnings.push(Warning::new(WarningLevel::Note, 1051, "Unknown table 'test.t'"));

        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings.get(0).unwrap().code(), 1365);
        assert_eq!(warnings.get(1).unwrap().level(), WarningLevel::Note);

        let codes: Vec<u16> = warnings.iter().map(Warning::code).collect();
        assert_eq!(codes, [1365, 1051]);

        // re-enumerating yields the same sequence
        let again: Vec<u16> = (&warnings).into_iter().map(Warning::code).collect();
        assert_eq!(codes, again);
    }

    #[test]
    fn it_reports_out_of_range() {
        let warnings = Warnings::default();
        let err = warnings.get(0).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(err.to_string(), "warning index out of bounds: the len is 0, but the index is 0");
    }

    #[test]
    fn it_displays() {
        let warning = Warning::new(WarningLevel::Warning, 1365, "Division by 0");
        assert_eq!(warning.to_string(), "Warning (1365): Division by 0");

        assert!(WarningLevel::from_code(7).is_err());
    }
}
