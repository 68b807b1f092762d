use async_trait::async_trait;

use crate::domain::document::model::DocumentChange;
use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::model::NotifyOutcome;

#[async_trait]
pub trait NotifyWatchedFieldUseCase: Send + Sync {
    fn trigger_name(&self) -> String;

    async fn execute(&self, change: &DocumentChange) -> Result<NotifyOutcome, NotificationError>;
}
