use std::env;

use super::lookup_non_empty;

/// Server configuration for HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: String,
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "0.0.0.0" when PORT is set, else "127.0.0.1")
    /// - SERVICE_PORT: Port to bind, falling back to PORT as set by Cloud Run (default: "8080")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let on_platform = lookup_non_empty(&lookup, "PORT").is_some();
        let ip = lookup_non_empty(&lookup, "SERVICE_IP").unwrap_or_else(|| {
            if on_platform { "0.0.0.0" } else { "127.0.0.1" }.to_string()
        });
        let port = lookup_non_empty(&lookup, "SERVICE_PORT")
            .or_else(|| lookup_non_empty(&lookup, "PORT"))
            .unwrap_or_else(|| "8080".to_string());

        Self { ip, port }
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
