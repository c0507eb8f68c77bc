use crate::domain::container::{Array, Record};
use crate::domain::value::Value;
use crate::error::{Result, TraverseError};
use serde_json::Value as Json;

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(*b),
            // Precision beyond f64 is lost, as with any JSON number read into a double.
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::from(s.as_str()),
            Json::Array(items) => Value::Array(items.iter().map(Value::from).collect::<Array>()),
            Json::Object(entries) => Value::Record(
                entries
                    .iter()
                    .map(|(key, value)| (key.as_str(), Value::from(value)))
                    .collect::<Record>(),
            ),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from(&json)
    }
}

impl Value {
    /// Parses a JSON document into a fresh, acyclic value tree.
    ///
    /// Objects become records that keep the document's key order.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Json = serde_json::from_str(json).map_err(TraverseError::InvalidDocument)?;
        Ok(Value::from(&document))
    }
}
