use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::errors::DocumentError;
use super::path::DocumentPath;

/// Field value as stored in the document store.
///
/// Composite values (maps, arrays, references, bytes, geo points) are not
/// inspected by this service and collapse to `Unsupported`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Null,
    Unsupported,
}

impl FieldValue {
    /// The string content when this is a non-empty string, whitespace included.
    pub fn as_non_empty_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Double(_) => "double",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Null => "null",
            FieldValue::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: DocumentPath,
    pub fields: HashMap<String, FieldValue>,
}

impl Document {
    pub fn new(path: DocumentPath, fields: HashMap<String, FieldValue>) -> Self {
        Self { path, fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Created => write!(f, "created"),
            ChangeKind::Updated => write!(f, "updated"),
            ChangeKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// State of one document before and after a write.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    path: DocumentPath,
    before: Option<Document>,
    after: Option<Document>,
}

impl DocumentChange {
    pub fn new(before: Option<Document>, after: Option<Document>) -> Result<Self, DocumentError> {
        let path = match (&before, &after) {
            (None, None) => return Err(DocumentError::EmptyChange),
            (Some(b), Some(a)) if b.path != a.path => return Err(DocumentError::PathMismatch),
            (_, Some(doc)) | (Some(doc), None) => doc.path.clone(),
        };
        Ok(Self {
            path,
            before,
            after,
        })
    }

    pub fn created(document: Document) -> Self {
        Self {
            path: document.path.clone(),
            before: None,
            after: Some(document),
        }
    }

    pub fn deleted(document: Document) -> Self {
        Self {
            path: document.path.clone(),
            before: Some(document),
            after: None,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match (&self.before, &self.after) {
            (None, _) => ChangeKind::Created,
            (Some(_), Some(_)) => ChangeKind::Updated,
            (Some(_), None) => ChangeKind::Deleted,
        }
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn after(&self) -> Option<&Document> {
        self.after.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(path: &str, fields: &[(&str, FieldValue)]) -> Document {
        Document::new(
            DocumentPath::new(path).unwrap(),
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn should_return_string_when_field_has_text() {
        let value = FieldValue::String("button broken".to_string());
        assert_eq!(value.as_non_empty_str(), Some("button broken"));
    }

    #[test]
    fn should_keep_surrounding_whitespace_in_non_empty_str() {
        let value = FieldValue::String("  spaced  ".to_string());
        assert_eq!(value.as_non_empty_str(), Some("  spaced  "));
    }

    #[test]
    fn should_return_whitespace_only_string_as_present() {
        let value = FieldValue::String("   ".to_string());
        assert_eq!(value.as_non_empty_str(), Some("   "));
    }

    #[test]
    fn should_treat_empty_and_non_string_values_as_absent() {
        assert_eq!(FieldValue::String(String::new()).as_non_empty_str(), None);
        assert_eq!(FieldValue::Null.as_non_empty_str(), None);
        assert_eq!(FieldValue::Integer(3).as_non_empty_str(), None);
        assert_eq!(FieldValue::Boolean(true).as_non_empty_str(), None);
    }

    #[test]
    fn should_classify_change_as_created_when_no_previous_state() {
        let change = DocumentChange::created(document("feedbacks/a", &[]));
        assert_eq!(change.kind(), ChangeKind::Created);
        assert_eq!(change.path().as_str(), "feedbacks/a");
    }

    #[test]
    fn should_classify_change_as_updated_when_both_states_present() {
        let change = DocumentChange::new(
            Some(document("known_issues/user_input", &[])),
            Some(document(
                "known_issues/user_input",
                &[("title", FieldValue::String("crash".to_string()))],
            )),
        )
        .unwrap();
        assert_eq!(change.kind(), ChangeKind::Updated);
    }

    #[test]
    fn should_classify_change_as_deleted_when_only_previous_state() {
        let change = DocumentChange::deleted(document("known_issues/user_input", &[]));
        assert_eq!(change.kind(), ChangeKind::Deleted);
        assert_eq!(change.path().as_str(), "known_issues/user_input");
        assert!(change.after().is_none());
    }

    #[test]
    fn should_reject_change_without_any_state() {
        let result = DocumentChange::new(None, None);
        assert_eq!(result.unwrap_err(), DocumentError::EmptyChange);
    }

    #[test]
    fn should_reject_change_when_paths_differ() {
        let result = DocumentChange::new(
            Some(document("feedbacks/a", &[])),
            Some(document("feedbacks/b", &[])),
        );
        assert_eq!(result.unwrap_err(), DocumentError::PathMismatch);
    }
}
