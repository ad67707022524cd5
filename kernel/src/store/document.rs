use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::store::StoreError;

/// Snapshot of one stored document. `fields` never contains `id`; it is
/// injected when the document is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn to_value(&self) -> Value {
        let mut fields = self.fields.clone();
        fields.insert("id".into(), Value::String(self.id.clone()));
        Value::Object(fields)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.to_value())
            .map_err(|e| StoreError::Decode(format!("{}: {e}", self.id)))
    }
}

/// Serializes a write payload into document fields.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(mut fields)) => {
            fields.remove("id");
            Ok(fields)
        }
        Ok(other) => Err(StoreError::Decode(format!(
            "document payload must be an object, got {other}"
        ))),
        Err(e) => Err(StoreError::Decode(e.to_string())),
    }
}
