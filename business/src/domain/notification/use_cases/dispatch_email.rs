use async_trait::async_trait;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::model::Category;

pub struct DispatchEmailParams {
    pub category: Category,
    pub body: String,
}

#[async_trait]
pub trait DispatchEmailUseCase: Send + Sync {
    async fn execute(&self, params: DispatchEmailParams) -> Result<(), NotificationError>;
}
