use std::env;

use business::domain::notification::model::MailSettings;
use business::domain::notification::subject::{DEFAULT_SUBJECT_TEMPLATE, SubjectTemplate};
use mailer::smtp::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, parse_mailbox};

use super::{ConfigError, lookup_non_empty, require};

pub const DEFAULT_APP_NAME: &str = "FlightLab";

/// Mail addressing and relay settings.
///
/// Environment variables:
/// - MAIL_FROM: sender address, also the SMTP username (required)
/// - MAIL_TO: recipient address (required)
/// - SMTP_HOST: relay host (default: "smtp.gmail.com")
/// - SMTP_PORT: relay port (default: 587)
/// - APP_NAME: product name for the subject line (default: "FlightLab")
/// - MAIL_SUBJECT_TEMPLATE: subject template (default: "[{app_name}] New {category} received")
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub settings: MailSettings,
}

impl MailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let sender = require(&lookup, "MAIL_FROM")?;
        let recipient = require(&lookup, "MAIL_TO")?;

        for (key, address) in [("MAIL_FROM", &sender), ("MAIL_TO", &recipient)] {
            if parse_mailbox(address).is_err() {
                return Err(ConfigError::InvalidEnvVar(key.to_string(), address.clone()));
            }
        }

        let smtp_host =
            lookup_non_empty(&lookup, "SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = match lookup_non_empty(&lookup, "SMTP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), raw))?,
            None => DEFAULT_SMTP_PORT,
        };

        let app_name =
            lookup_non_empty(&lookup, "APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        let template = lookup_non_empty(&lookup, "MAIL_SUBJECT_TEMPLATE")
            .unwrap_or_else(|| DEFAULT_SUBJECT_TEMPLATE.to_string());
        let subject = SubjectTemplate::new(template.clone(), app_name).map_err(|_| {
            ConfigError::InvalidEnvVar("MAIL_SUBJECT_TEMPLATE".to_string(), template)
        })?;

        Ok(Self {
            smtp_host,
            smtp_port,
            settings: MailSettings {
                sender,
                recipient,
                subject,
            },
        })
    }
}
