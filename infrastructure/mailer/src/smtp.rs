//! SMTP delivery of notification emails.
//!
//! A transport is built, authenticated and dropped for every message.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;

use business::domain::notification::errors::MailError;
use business::domain::notification::model::{EmailMessage, MailCredentials};
use business::domain::notification::services::MailSender;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Reply codes meaning the credentials were refused.
const AUTH_FAILURE_CODES: [&str; 3] = ["530", "534", "535"];

pub struct SmtpMailSender {
    host: String,
    port: u16,
}

impl SmtpMailSender {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Builds the plain-text message; the body is sent as given.
    pub fn build_message(
        credentials: &MailCredentials,
        message: &EmailMessage,
    ) -> Result<Message, MailError> {
        let from = parse_mailbox(&credentials.sender)?;
        let to = parse_mailbox(&message.recipient)?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|_| MailError::Rejected)
    }

    fn transport(
        &self,
        credentials: &MailCredentials,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let smtp_credentials = Credentials::new(
            credentials.sender.clone(),
            credentials.password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|err| classify(&err))?
            .port(self.port)
            .credentials(smtp_credentials)
            .build();

        Ok(transport)
    }
}

/// Parses an address the same way outgoing messages do.
pub fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

fn classify(err: &SmtpError) -> MailError {
    let code = err.status().map(|code| code.to_string());
    match code.as_deref() {
        Some(code) if AUTH_FAILURE_CODES.contains(&code) => MailError::Authentication,
        _ if err.is_permanent() => MailError::Rejected,
        _ => MailError::Transport,
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(
        &self,
        credentials: &MailCredentials,
        message: &EmailMessage,
    ) -> Result<(), MailError> {
        let email = Self::build_message(credentials, message)?;
        let transport = self.transport(credentials)?;

        transport.send(email).await.map_err(|err| {
            tracing::warn!(host = %self.host, error = %err, "SMTP delivery failed");
            classify(&err)
        })?;

        tracing::info!(to = %message.recipient, subject = %message.subject, "Email sent successfully");
        Ok(())
    }
}
