use serde::Deserialize;

use business::domain::document::errors::DocumentError;
use business::domain::document::model::DocumentChange;

use crate::wire::FirestoreDocument;

/// Firestore document event as delivered to background functions.
///
/// `value` is the state after the write and `oldValue` the state before it.
/// Either may be missing or `{}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreEvent {
    pub event_id: Option<String>,
    pub value: Option<FirestoreDocument>,
    pub old_value: Option<FirestoreDocument>,
}

impl FirestoreEvent {
    pub fn into_change(self) -> Result<DocumentChange, DocumentError> {
        let before = present(self.old_value)
            .map(FirestoreDocument::into_domain)
            .transpose()?;
        let after = present(self.value)
            .map(FirestoreDocument::into_domain)
            .transpose()?;
        DocumentChange::new(before, after)
    }
}

fn present(document: Option<FirestoreDocument>) -> Option<FirestoreDocument> {
    document.filter(|d| !d.is_empty())
}
