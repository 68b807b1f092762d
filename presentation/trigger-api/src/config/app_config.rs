use super::{
    ConfigError, auth_config::AuthConfig, firebase_config::FirebaseConfig, mail_config::MailConfig,
    secret_config::SecretConfig, server_config::ServerConfig,
};

pub struct AppConfig {
    pub server: ServerConfig,
    pub firebase: FirebaseConfig,
    pub mail: MailConfig,
    pub secret: SecretConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            firebase: FirebaseConfig::from_env()?,
            mail: MailConfig::from_env()?,
            secret: SecretConfig::from_env()?,
            auth: AuthConfig::from_env()?,
        })
    }
}
