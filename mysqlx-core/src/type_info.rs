use std::fmt::{self, Display, Formatter};

use crate::error::Result;

/// Types that can be reported in result metadata.
///
/// The numeric value of each variant is the code the result source uses to
/// identify the type.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Type {
    Bit = 1,
    TinyInt = 2,
    SmallInt = 3,
    MediumInt = 4,
    Int = 5,
    BigInt = 6,
    Float = 7,
    Decimal = 8,
    Double = 9,
    Json = 10,
    String = 11,
    Bytes = 12,
    Time = 13,
    Date = 14,
    DateTime = 15,
    Timestamp = 16,
    Set = 17,
    Enum = 18,
    Geometry = 19,
    Document = 20,
}

impl Type {
    /// Returns the type for a code reported by the result source.
    ///
    /// An unknown code means the server speaks a newer protocol than this library
    /// understands, so it is reported as a protocol error.
    pub fn from_code(code: u16) -> Result<Self> {
        Ok(match code {
            1 => Self::Bit,
            2 => Self::TinyInt,
            3 => Self::SmallInt,
            4 => Self::MediumInt,
            5 => Self::Int,
            6 => Self::BigInt,
            7 => Self::Float,
            8 => Self::Decimal,
            9 => Self::Double,
            10 => Self::Json,
            11 => Self::String,
            12 => Self::Bytes,
            13 => Self::Time,
            14 => Self::Date,
            15 => Self::DateTime,
            16 => Self::Timestamp,
            17 => Self::Set,
            18 => Self::Enum,
            19 => Self::Geometry,
            20 => Self::Document,

            _ => return Err(err_protocol!("unknown column type code: {}", code)),
        })
    }

    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Returns the name for this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bit => "BIT",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::MediumInt => "MEDIUMINT",
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Decimal => "DECIMAL",
            Self::Double => "DOUBLE",
            Self::Json => "JSON",
            Self::String => "STRING",
            Self::Bytes => "BYTES",
            Self::Time => "TIME",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Set => "SET",
            Self::Enum => "ENUM",
            Self::Geometry => "GEOMETRY",
            Self::Document => "DOCUMENT",
        }
    }

    /// Returns `true` if this is an integer data type.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::TinyInt | Self::SmallInt | Self::MediumInt | Self::Int | Self::BigInt)
    }

    /// Returns `true` if values of this type can carry a sign.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, Self::Float | Self::Decimal | Self::Double)
    }

    /// Returns `true` if values of this type are text in some character set.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String | Self::Enum | Self::Set | Self::Json)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Type;
    use crate::error::ErrorKind;

    #[test]
    fn it_maps_codes() -> anyhow::Result<()> {
        for code in 1..=20 {
            assert_eq!(Type::from_code(code)?.code(), code);
        }

        assert_eq!(Type::from_code(6)?, Type::BigInt);
        assert_eq!(Type::BigInt.to_string(), "BIGINT");

        Ok(())
    }

    #[test]
    fn it_rejects_unknown_codes() {
        let err = Type::from_code(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProtocolInconsistency);

        let err = Type::from_code(21).unwrap_err();
        assert_eq!(err.to_string(), "encountered unexpected or invalid data: unknown column type code: 21");
    }
}
