use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use business::domain::document::errors::DocumentError;
use business::domain::document::model::{Document, FieldValue};
use business::domain::document::path::DocumentPath;

const DOCUMENTS_MARKER: &str = "/documents/";

/// Firestore REST representation of a document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl FirestoreDocument {
    /// Event payloads use `{}` for "no document".
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.fields.is_empty()
    }

    pub fn into_domain(self) -> Result<Document, DocumentError> {
        let path = relative_path(&self.name)?;
        let fields = self
            .fields
            .into_iter()
            .map(|(name, value)| {
                let decoded = decode_value(&value);
                (name, decoded)
            })
            .collect();

        Ok(Document::new(path, fields))
    }
}

/// Strips `projects/{p}/databases/{d}/documents/` from a resource name.
pub fn relative_path(name: &str) -> Result<DocumentPath, DocumentError> {
    let start = name
        .find(DOCUMENTS_MARKER)
        .filter(|_| name.starts_with("projects/"))
        .ok_or_else(|| DocumentError::InvalidPath(name.to_string()))?;
    DocumentPath::new(&name[start + DOCUMENTS_MARKER.len()..])
}

/// Decodes one typed Firestore value (`{"stringValue": "..."}` and friends).
pub fn decode_value(value: &Value) -> FieldValue {
    let Some(object) = value.as_object() else {
        return FieldValue::Unsupported;
    };

    if let Some(s) = object.get("stringValue").and_then(Value::as_str) {
        return FieldValue::String(s.to_string());
    }
    if let Some(raw) = object.get("integerValue") {
        // int64 values travel as JSON strings.
        let parsed = match raw {
            Value::String(s) => s.parse::<i64>().ok(),
            other => other.as_i64(),
        };
        return parsed.map_or(FieldValue::Unsupported, FieldValue::Integer);
    }
    if let Some(raw) = object.get("doubleValue") {
        let parsed = match raw {
            Value::String(s) => s.parse::<f64>().ok(),
            other => other.as_f64(),
        };
        return parsed.map_or(FieldValue::Unsupported, FieldValue::Double);
    }
    if let Some(b) = object.get("booleanValue").and_then(Value::as_bool) {
        return FieldValue::Boolean(b);
    }
    if let Some(ts) = object.get("timestampValue").and_then(Value::as_str) {
        return DateTime::parse_from_rfc3339(ts)
            .map(|t| FieldValue::Timestamp(t.with_timezone(&Utc)))
            .unwrap_or(FieldValue::Unsupported);
    }
    if object.contains_key("nullValue") {
        return FieldValue::Null;
    }

    FieldValue::Unsupported
}
