use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde_json::{Map, Value as JsonValue};

use crate::error::{BoxDynError, Result};
use crate::value::Value;

/// A document stored in a collection: a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DbDoc(Map<String, JsonValue>);

impl DbDoc {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a top-level field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the generated or user-supplied `_id` of this document.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get("_id").and_then(JsonValue::as_str)
    }

    /// Iterates over the names of the top-level fields, in document order.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Map<String, JsonValue> {
        self.0
    }

    /// Reads a document from the fields of a raw row.
    ///
    /// Documents are sent as rows with a single column holding the JSON text.
    pub(crate) fn from_row_values(values: &[Value]) -> Result<Self> {
        match values.first() {
            Some(Value::Document(doc)) => Ok(doc.clone()),

            Some(Value::String(json)) => json
                .parse()
                .map_err(|e| err_protocol!("document is not a JSON object: {}", e)),

            Some(Value::Bytes(json)) => serde_json::from_slice::<JsonValue>(json)
                .map_err(BoxDynError::from)
                .and_then(|json| Self::try_from(json).map_err(BoxDynError::from))
                .map_err(|e| err_protocol!("document is not a JSON object: {}", e)),

            Some(value) => {
                Err(err_protocol!("expected a document but received a value of type {}", value.kind()))
            }

            None => Err(err_protocol!("expected a document but received an empty row")),
        }
    }
}

/// A JSON value that is not an object was given where a document was expected.
#[derive(Debug, thiserror::Error)]
#[error("expected a JSON object, found {0}")]
pub struct NotAnObjectError(&'static str);

impl TryFrom<JsonValue> for DbDoc {
    type Error = NotAnObjectError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            JsonValue::Null => Err(NotAnObjectError("null")),
            JsonValue::Bool(_) => Err(NotAnObjectError("a boolean")),
            JsonValue::Number(_) => Err(NotAnObjectError("a number")),
            JsonValue::String(_) => Err(NotAnObjectError("a string")),
            JsonValue::Array(_) => Err(NotAnObjectError("an array")),
        }
    }
}

impl From<Map<String, JsonValue>> for DbDoc {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl From<DbDoc> for JsonValue {
    fn from(doc: DbDoc) -> Self {
        Self::Object(doc.0)
    }
}

impl FromStr for DbDoc {
    type Err = BoxDynError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: JsonValue = serde_json::from_str(s)?;

        Ok(Self::try_from(value)?)
    }
}

impl Display for DbDoc {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // a map of JSON values always serializes
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// The identifier of a document added to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentId(String);

impl DocumentId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&'_ str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
