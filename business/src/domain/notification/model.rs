use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::document::errors::DocumentError;
use crate::domain::document::model::ChangeKind;
use crate::domain::document::path::{DocumentPath, PathPattern};

use super::subject::SubjectTemplate;

/// Kind of notification, rendered into the subject line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Feedback,
    Issue,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Feedback => write!(f, "feedback"),
            Category::Issue => write!(f, "issue"),
        }
    }
}

/// Which document writes a trigger listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Document creation only.
    Create,
    /// Creation, update or deletion.
    Write,
}

impl EventKind {
    pub fn accepts(&self, change: ChangeKind) -> bool {
        match self {
            EventKind::Create => change == ChangeKind::Created,
            EventKind::Write => true,
        }
    }
}

/// Configuration of one watched-field trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedField {
    pub name: String,
    pub event_source: PathPattern,
    pub kind: EventKind,
    pub field: String,
    pub category: Category,
}

impl WatchedField {
    /// New feedback documents, notified through their `text` field.
    pub fn feedback_created() -> Result<Self, DocumentError> {
        Ok(Self {
            name: "feedback_created".to_string(),
            event_source: PathPattern::parse("feedbacks/{id}")?,
            kind: EventKind::Create,
            field: "text".to_string(),
            category: Category::Feedback,
        })
    }

    /// Any write of the shared issue document, notified through its `title` field.
    pub fn issue_written() -> Result<Self, DocumentError> {
        Ok(Self {
            name: "issue_written".to_string(),
            event_source: PathPattern::parse("known_issues/user_input")?,
            kind: EventKind::Write,
            field: "title".to_string(),
            category: Category::Issue,
        })
    }
}

/// Where the mail password is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretLocation {
    pub document: DocumentPath,
    pub field: String,
}

/// Sender identity used to authenticate against the mail provider.
#[derive(Debug, Clone)]
pub struct MailCredentials {
    pub sender: String,
    pub password: SecretString,
}

/// Fixed addressing of every notification email.
#[derive(Debug, Clone, PartialEq)]
pub struct MailSettings {
    pub sender: String,
    pub recipient: String,
    pub subject: SubjectTemplate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyOutcome {
    Dispatched,
    Skipped,
    Ignored,
}

impl std::fmt::Display for NotifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyOutcome::Dispatched => write!(f, "dispatched"),
            NotifyOutcome::Skipped => write!(f, "skipped"),
            NotifyOutcome::Ignored => write!(f, "ignored"),
        }
    }
}

/// Outcome of one trigger for one document change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerReport {
    pub trigger: String,
    pub outcome: NotifyOutcome,
}
