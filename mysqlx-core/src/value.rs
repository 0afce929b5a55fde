use std::any::type_name;
use std::fmt::{self, Display, Formatter};
use std::slice;

use bytes::Bytes;

use crate::document::DbDoc;
use crate::error::{BoxDynError, UnexpectedNullError};

/// A single field value of a row.
///
/// Values arrive already decoded from the wire by the result source; this type only
/// carries them to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    Bool(bool),
    String(String),
    Bytes(Bytes),
    Document(DbDoc),
    Array(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a name for the kind of this value, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Int(_) => "INT",
            Self::UInt(_) => "UINT",
            Self::Float(_) => "FLOAT",
            Self::Double(_) => "DOUBLE",
            Self::Bool(_) => "BOOL",
            Self::String(_) => "STRING",
            Self::Bytes(_) => "BYTES",
            Self::Document(_) => "DOCUMENT",
            Self::Array(_) => "ARRAY",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Bytes(v) => write!(f, "{v:?}"),
            Self::Document(v) => write!(f, "{v}"),
            Self::Array(values) => {
                f.write_str("[")?;

                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }

                    write!(f, "{value}")?;
                }

                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_for_value! {
    i8 => Int, i16 => Int, i32 => Int, i64 => Int,
    u8 => UInt, u16 => UInt, u32 => UInt, u64 => UInt,
    f32 => Float, f64 => Double,
    bool => Bool,
    String => String, &'_ str => String,
    Bytes => Bytes, Vec<u8> => Bytes,
    DbDoc => Document,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A type that can be decoded from a field [`Value`].
pub trait Decode: Sized {
    fn decode(value: &Value) -> Result<Self, BoxDynError>;
}

fn mismatched_types<T>(value: &Value) -> BoxDynError {
    if value.is_null() {
        return UnexpectedNullError.into();
    }

    format!(
        "mismatched types; Rust type `{}` is not compatible with value of type {}",
        type_name::<T>(),
        value.kind()
    )
    .into()
}

macro_rules! impl_decode_for_int {
    ($($ty:ty),*) => {
        $(
            impl Decode for $ty {
                fn decode(value: &Value) -> Result<Self, BoxDynError> {
                    match *value {
                        Value::Int(v) => Ok(<$ty>::try_from(v)?),
                        Value::UInt(v) => Ok(<$ty>::try_from(v)?),
                        Value::Bool(v) => Ok(<$ty>::from(v)),

                        _ => Err(mismatched_types::<$ty>(value)),
                    }
                }
            }
        )*
    };
}

impl_decode_for_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Decode for f64 {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        match *value {
            Value::Double(v) => Ok(v),
            Value::Float(v) => Ok(v.into()),

            _ => Err(mismatched_types::<Self>(value)),
        }
    }
}

impl Decode for f32 {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        match *value {
            Value::Float(v) => Ok(v),

            _ => Err(mismatched_types::<Self>(value)),
        }
    }
}

impl Decode for bool {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        match *value {
            Value::Bool(v) => Ok(v),
            Value::Int(v) => Ok(v != 0),
            Value::UInt(v) => Ok(v != 0),

            _ => Err(mismatched_types::<Self>(value)),
        }
    }
}

impl Decode for String {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        match value {
            Value::String(v) => Ok(v.clone()),
            Value::Bytes(v) => Ok(std::str::from_utf8(v)?.to_owned()),

            _ => Err(mismatched_types::<Self>(value)),
        }
    }
}

impl Decode for Bytes {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        match value {
            Value::Bytes(v) => Ok(v.clone()),
            Value::String(v) => Ok(Bytes::copy_from_slice(v.as_bytes())),

            _ => Err(mismatched_types::<Self>(value)),
        }
    }
}

impl Decode for Vec<u8> {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        Bytes::decode(value).map(Vec::from)
    }
}

impl Decode for DbDoc {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        match value {
            Value::Document(_) | Value::String(_) | Value::Bytes(_) => {
                Ok(DbDoc::from_row_values(slice::from_ref(value))?)
            }

            _ => Err(mismatched_types::<Self>(value)),
        }
    }
}

impl Decode for Value {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        Ok(value.clone())
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(value: &Value) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(None);
        }

        T::decode(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::{Decode, Value};

    #[test]
    fn it_decodes_integers() -> anyhow::Result<()> {
        assert_eq!(i32::decode(&Value::Int(-5)).unwrap(), -5);
        assert_eq!(u64::decode(&Value::UInt(u64::MAX)).unwrap(), u64::MAX);
        assert_eq!(i64::decode(&Value::UInt(7)).unwrap(), 7);

        // does not fit
        assert!(u8::decode(&Value::Int(300)).is_err());
        assert!(u32::decode(&Value::Int(-1)).is_err());

        Ok(())
    }

    #[test]
    fn it_reports_mismatched_types() {
        let err = i64::decode(&Value::String("x".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mismatched types; Rust type `i64` is not compatible with value of type STRING"
        );

        let err = String::decode(&Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "unexpected null; try decoding as an `Option`");
    }

    #[test]
    fn it_decodes_options() {
        assert_eq!(Option::<i64>::decode(&Value::Null).unwrap(), None);
        assert_eq!(Option::<i64>::decode(&Value::Int(3)).unwrap(), Some(3));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn it_displays() {
        let value = Value::Array(vec![Value::Int(1), Value::Null, "a".into()]);
        assert_eq!(value.to_string(), "[1, NULL, a]");
    }
}
