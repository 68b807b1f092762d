use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::document::model::DocumentChange;
use crate::domain::logger::Logger;
use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::model::TriggerReport;
use crate::domain::notification::use_cases::notify_watched_field::NotifyWatchedFieldUseCase;
use crate::domain::notification::use_cases::route_event::RouteDocumentEventUseCase;

/// Hands a document change to every configured trigger in order.
///
/// The first failing trigger aborts routing and its error is returned.
pub struct RouteDocumentEventUseCaseImpl {
    pub notifiers: Vec<Arc<dyn NotifyWatchedFieldUseCase>>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RouteDocumentEventUseCase for RouteDocumentEventUseCaseImpl {
    async fn execute(
        &self,
        change: DocumentChange,
    ) -> Result<Vec<TriggerReport>, NotificationError> {
        self.logger.info(&format!(
            "Document {} {}",
            change.path(),
            change.kind()
        ));

        let mut reports = Vec::with_capacity(self.notifiers.len());
        for notifier in &self.notifiers {
            let trigger = notifier.trigger_name();
            let outcome = notifier.execute(&change).await.map_err(|err| {
                self.logger
                    .error(&format!("[{}] failed on {}: {}", trigger, change.path(), err));
                err
            })?;
            reports.push(TriggerReport { trigger, outcome });
        }

        Ok(reports)
    }
}
