use std::env;

use business::domain::document::path::DocumentPath;
use business::domain::notification::model::SecretLocation;

use super::{ConfigError, lookup_non_empty};

pub const DEFAULT_SECRET_DOCUMENT: &str = "secret/emailPassword";
pub const DEFAULT_SECRET_FIELD: &str = "password";

/// Location of the mail password in the secret store.
///
/// Environment variables:
/// - SECRET_DOCUMENT: document path (default: "secret/emailPassword")
/// - SECRET_FIELD: field holding the password (default: "password")
pub struct SecretConfig {
    pub location: SecretLocation,
}

impl SecretConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let document = lookup_non_empty(&lookup, "SECRET_DOCUMENT")
            .unwrap_or_else(|| DEFAULT_SECRET_DOCUMENT.to_string());
        let field = lookup_non_empty(&lookup, "SECRET_FIELD")
            .unwrap_or_else(|| DEFAULT_SECRET_FIELD.to_string());

        let document = DocumentPath::new(document.clone())
            .map_err(|_| ConfigError::InvalidEnvVar("SECRET_DOCUMENT".to_string(), document))?;

        Ok(Self {
            location: SecretLocation { document, field },
        })
    }
}
