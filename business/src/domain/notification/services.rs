use async_trait::async_trait;

use super::errors::MailError;
use super::model::{EmailMessage, MailCredentials};

/// Service port for handing one message to the mail provider.
///
/// Implementations authenticate with `credentials` on every call and keep no
/// connection between calls.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(
        &self,
        credentials: &MailCredentials,
        message: &EmailMessage,
    ) -> Result<(), MailError>;
}
