pub mod app_config;
pub mod auth_config;
pub mod firebase_config;
pub mod mail_config;
pub mod secret_config;
pub mod server_config;

/// Startup configuration errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Reads a variable, treating blank values as unset.
pub(crate) fn lookup_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

pub(crate) fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    lookup_non_empty(lookup, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}
