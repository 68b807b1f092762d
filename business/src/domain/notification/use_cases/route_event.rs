use async_trait::async_trait;

use crate::domain::document::model::DocumentChange;
use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::model::TriggerReport;

#[async_trait]
pub trait RouteDocumentEventUseCase: Send + Sync {
    async fn execute(
        &self,
        change: DocumentChange,
    ) -> Result<Vec<TriggerReport>, NotificationError>;
}
