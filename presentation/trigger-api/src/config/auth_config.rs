use std::env;

use super::{ConfigError, lookup_non_empty, require};

/// Verification of the OIDC token attached to pushed events.
///
/// Environment variables:
/// - EVENTS_AUDIENCE: expected `aud` claim, usually the push endpoint URL (required unless disabled)
/// - EVENTS_INVOKER_EMAIL: service account allowed to push events (optional)
/// - EVENTS_AUTH_DISABLED: "true" turns verification off, for the emulator and local runs
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    pub push: Option<PushAuth>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushAuth {
    pub audience: String,
    pub invoker_email: Option<String>,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let disabled = match lookup_non_empty(&lookup, "EVENTS_AUTH_DISABLED") {
            Some(raw) => raw.trim().parse::<bool>().map_err(|_| {
                ConfigError::InvalidEnvVar("EVENTS_AUTH_DISABLED".to_string(), raw)
            })?,
            None => false,
        };

        if disabled {
            return Ok(Self { push: None });
        }

        Ok(Self {
            push: Some(PushAuth {
                audience: require(&lookup, "EVENTS_AUDIENCE")?,
                invoker_email: lookup_non_empty(&lookup, "EVENTS_INVOKER_EMAIL"),
            }),
        })
    }
}
