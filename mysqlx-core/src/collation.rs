// The server describes the character encoding of a column only through its
// collation ID. Collation IDs are assigned mostly sequentially with gaps, and new
// ones are added from release to release, so a collation we don't recognize is not
// a protocol error. It stays representable by ID; only its name and character set
// are reported as unknown.
//
// Columns of non-string types always report `binary` (63).

use std::fmt::{self, Display, Formatter};

/// A character set, as reported for string columns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum CharacterSet {
    Big5,
    Latin1,
    Sjis,
    Ascii,
    Gb2312,
    Gbk,
    Utf8mb3,
    Utf8mb4,
    Utf16,
    Utf32,
    Binary,
    Cp932,
    Gb18030,
}

impl CharacterSet {
    /// Returns the name the server uses for this character set.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Big5 => "big5",
            Self::Latin1 => "latin1",
            Self::Sjis => "sjis",
            Self::Ascii => "ascii",
            Self::Gb2312 => "gb2312",
            Self::Gbk => "gbk",
            Self::Utf8mb3 => "utf8mb3",
            Self::Utf8mb4 => "utf8mb4",
            Self::Utf16 => "utf16",
            Self::Utf32 => "utf32",
            Self::Binary => "binary",
            Self::Cp932 => "cp932",
            Self::Gb18030 => "gb18030",
        }
    }
}

impl Display for CharacterSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a collation compares strings, taken from its name suffix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CollationCase {
    /// `_ci`, and accent-insensitive variants such as `_ai_ci`.
    Insensitive,

    /// `_cs`, and accent-sensitive variants such as `_as_cs`.
    Sensitive,

    /// `_bin` and `binary`; compares code points or bytes.
    Binary,
}

/// The collation of a column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collation(pub u16);

impl Collation {
    /// Collation used for all non-string data.
    pub const BINARY: Self = Collation(63);

    /// Most broadly supported UTF-8 collation.
    pub const UTF8MB4_GENERAL_CI: Self = Collation(45);

    /// Default collation of the `utf8mb4` character set since MySQL 8.0.
    pub const UTF8MB4_0900_AI_CI: Self = Collation(255);

    #[must_use]
    pub const fn id(self) -> u16 {
        self.0
    }

    /// Returns the name of this collation, if it is known.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        self.lookup().map(|&(_, name, _)| name)
    }

    /// Returns the character set this collation belongs to, if it is known.
    #[must_use]
    pub fn character_set(self) -> Option<CharacterSet> {
        self.lookup().map(|&(_, _, charset)| charset)
    }

    /// Returns how this collation compares strings, if it is known.
    #[must_use]
    pub fn case(self) -> Option<CollationCase> {
        let name = self.name()?;

        Some(if name == "binary" || name.ends_with("_bin") {
            CollationCase::Binary
        } else if name.ends_with("_cs") {
            CollationCase::Sensitive
        } else {
            CollationCase::Insensitive
        })
    }

    fn lookup(self) -> Option<&'static (u16, &'static str, CharacterSet)> {
        COLLATIONS.iter().find(|(id, ..)| *id == self.0)
    }
}

impl Display for Collation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "collation #{}", self.0),
        }
    }
}

// https://dev.mysql.com/doc/refman/8.0/en/information-schema-collations-table.html
static COLLATIONS: &[(u16, &str, CharacterSet)] = &[
    (1, "big5_chinese_ci", CharacterSet::Big5),
    (5, "latin1_german1_ci", CharacterSet::Latin1),
    (8, "latin1_swedish_ci", CharacterSet::Latin1),
    (11, "ascii_general_ci", CharacterSet::Ascii),
    (13, "sjis_japanese_ci", CharacterSet::Sjis),
    (24, "gb2312_chinese_ci", CharacterSet::Gb2312),
    (28, "gbk_chinese_ci", CharacterSet::Gbk),
    (33, "utf8mb3_general_ci", CharacterSet::Utf8mb3),
    (45, "utf8mb4_general_ci", CharacterSet::Utf8mb4),
    (46, "utf8mb4_bin", CharacterSet::Utf8mb4),
    (47, "latin1_bin", CharacterSet::Latin1),
    (48, "latin1_general_ci", CharacterSet::Latin1),
    (49, "latin1_general_cs", CharacterSet::Latin1),
    (54, "utf16_general_ci", CharacterSet::Utf16),
    (55, "utf16_bin", CharacterSet::Utf16),
    (60, "utf32_general_ci", CharacterSet::Utf32),
    (61, "utf32_bin", CharacterSet::Utf32),
    (63, "binary", CharacterSet::Binary),
    (65, "ascii_bin", CharacterSet::Ascii),
    (83, "utf8mb3_bin", CharacterSet::Utf8mb3),
    (95, "cp932_japanese_ci", CharacterSet::Cp932),
    (192, "utf8mb3_unicode_ci", CharacterSet::Utf8mb3),
    (224, "utf8mb4_unicode_ci", CharacterSet::Utf8mb4),
    (248, "gb18030_chinese_ci", CharacterSet::Gb18030),
    (255, "utf8mb4_0900_ai_ci", CharacterSet::Utf8mb4),
    (278, "utf8mb4_0900_as_cs", CharacterSet::Utf8mb4),
    (309, "utf8mb4_0900_bin", CharacterSet::Utf8mb4),
];

#[cfg(test)]
mod tests {
    use super::{CharacterSet, Collation, CollationCase};

    #[test]
    fn it_looks_up_known_collations() {
        assert_eq!(Collation::UTF8MB4_0900_AI_CI.name(), Some("utf8mb4_0900_ai_ci"));
        assert_eq!(Collation::UTF8MB4_0900_AI_CI.character_set(), Some(CharacterSet::Utf8mb4));
        assert_eq!(Collation::UTF8MB4_0900_AI_CI.case(), Some(CollationCase::Insensitive));

        assert_eq!(Collation(278).case(), Some(CollationCase::Sensitive));
        assert_eq!(Collation::BINARY.case(), Some(CollationCase::Binary));
        assert_eq!(Collation::BINARY.character_set(), Some(CharacterSet::Binary));
        assert_eq!(Collation(46).case(), Some(CollationCase::Binary));
    }

    #[test]
    fn it_keeps_unknown_collations() {
        let collation = Collation(4000);

        assert_eq!(collation.name(), None);
        assert_eq!(collation.character_set(), None);
        assert_eq!(collation.to_string(), "collation #4000");
    }
}
