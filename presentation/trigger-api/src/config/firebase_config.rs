use std::env;

use firestore::app::{DEFAULT_DATABASE_ID, FirebaseOptions};
use secrecy::SecretString;

use super::{ConfigError, lookup_non_empty, require};

/// Firebase project the service reads its secret from.
///
/// Environment variables:
/// - FIREBASE_PROJECT_ID: project id (required)
/// - FIRESTORE_DATABASE_ID: database id (default: "(default)")
/// - FIRESTORE_EMULATOR_HOST: `host:port` of a local emulator (optional)
/// - GOOGLE_OAUTH_ACCESS_TOKEN: static access token, otherwise the metadata server is used
pub struct FirebaseConfig {
    pub project_id: String,
    pub database_id: String,
    pub emulator_host: Option<String>,
    pub access_token: Option<SecretString>,
}

impl FirebaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            project_id: require(&lookup, "FIREBASE_PROJECT_ID")?,
            database_id: lookup_non_empty(&lookup, "FIRESTORE_DATABASE_ID")
                .unwrap_or_else(|| DEFAULT_DATABASE_ID.to_string()),
            emulator_host: lookup_non_empty(&lookup, "FIRESTORE_EMULATOR_HOST"),
            access_token: lookup_non_empty(&lookup, "GOOGLE_OAUTH_ACCESS_TOKEN")
                .map(SecretString::from),
        })
    }

    pub fn options(&self) -> FirebaseOptions {
        FirebaseOptions {
            project_id: self.project_id.clone(),
            database_id: self.database_id.clone(),
            emulator_host: self.emulator_host.clone(),
            access_token: self.access_token.clone(),
        }
    }
}
