use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use business::domain::document::model::ChangeKind;
use business::domain::notification::model::{NotifyOutcome, TriggerReport};

#[derive(Debug, Clone, Serialize, Deserialize, Enum)]
pub enum ChangeKindDto {
    #[oai(rename = "created")]
    Created,
    #[oai(rename = "updated")]
    Updated,
    #[oai(rename = "deleted")]
    Deleted,
}

impl From<ChangeKind> for ChangeKindDto {
    fn from(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Created => ChangeKindDto::Created,
            ChangeKind::Updated => ChangeKindDto::Updated,
            ChangeKind::Deleted => ChangeKindDto::Deleted,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Enum)]
pub enum NotifyOutcomeDto {
    #[oai(rename = "dispatched")]
    Dispatched,
    #[oai(rename = "skipped")]
    Skipped,
    #[oai(rename = "ignored")]
    Ignored,
}

impl From<NotifyOutcome> for NotifyOutcomeDto {
    fn from(outcome: NotifyOutcome) -> Self {
        match outcome {
            NotifyOutcome::Dispatched => NotifyOutcomeDto::Dispatched,
            NotifyOutcome::Skipped => NotifyOutcomeDto::Skipped,
            NotifyOutcome::Ignored => NotifyOutcomeDto::Ignored,
        }
    }
}

/// What one trigger did with the event
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct TriggerOutcomeResponse {
    pub trigger: String,
    pub outcome: NotifyOutcomeDto,
}

impl From<TriggerReport> for TriggerOutcomeResponse {
    fn from(report: TriggerReport) -> Self {
        Self {
            trigger: report.trigger,
            outcome: report.outcome.into(),
        }
    }
}

/// Acknowledgement of a processed document event
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct EventReceiptResponse {
    /// Platform event id, when the payload carried one
    pub event_id: Option<String>,
    /// Document path relative to the database root
    pub path: String,
    pub change: ChangeKindDto,
    pub outcomes: Vec<TriggerOutcomeResponse>,
}
