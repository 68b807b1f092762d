use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::document::model::DocumentChange;
use crate::domain::logger::Logger;
use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::model::{NotifyOutcome, WatchedField};
use crate::domain::notification::use_cases::dispatch_email::{
    DispatchEmailParams, DispatchEmailUseCase,
};
use crate::domain::notification::use_cases::notify_watched_field::NotifyWatchedFieldUseCase;

/// Sends one email per matching change whose watched field holds text.
///
/// The field is always read from the state after the write, so deletions
/// are skipped.
pub struct NotifyWatchedFieldUseCaseImpl {
    pub watch: WatchedField,
    pub dispatcher: Arc<dyn DispatchEmailUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl NotifyWatchedFieldUseCase for NotifyWatchedFieldUseCaseImpl {
    fn trigger_name(&self) -> String {
        self.watch.name.clone()
    }

    async fn execute(&self, change: &DocumentChange) -> Result<NotifyOutcome, NotificationError> {
        if !self.watch.event_source.matches(change.path()) || !self.watch.kind.accepts(change.kind())
        {
            return Ok(NotifyOutcome::Ignored);
        }

        let value = change
            .after()
            .and_then(|doc| doc.field(&self.watch.field))
            .and_then(|value| value.as_non_empty_str());

        let Some(text) = value else {
            self.logger.info(&format!(
                "[{}] No {} on {} ({}). Skipping email.",
                self.watch.name,
                self.watch.field,
                change.path(),
                change.kind()
            ));
            return Ok(NotifyOutcome::Skipped);
        };

        self.logger.info(&format!(
            "[{}] {} {}, dispatching {} notification",
            self.watch.name,
            change.path(),
            change.kind(),
            self.watch.category
        ));

        self.dispatcher
            .execute(DispatchEmailParams {
                category: self.watch.category,
                body: text.to_string(),
            })
            .await?;

        Ok(NotifyOutcome::Dispatched)
    }
}
