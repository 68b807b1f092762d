use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::notification::errors::SecretError;

#[async_trait]
pub trait FetchSecretUseCase: Send + Sync {
    async fn execute(&self) -> Result<SecretString, SecretError>;
}
