use crate::domain::errors::RepositoryError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SecretError {
    #[error("secret.not_found")]
    NotFound,
    #[error("secret.field_missing")]
    FieldMissing,
    #[error("secret.store_unavailable")]
    Store(RepositoryError),
}

impl From<RepositoryError> for SecretError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => SecretError::NotFound,
            other => SecretError::Store(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MailError {
    #[error("mail.invalid_address")]
    InvalidAddress(String),
    #[error("mail.authentication_failed")]
    Authentication,
    #[error("mail.rejected")]
    Rejected,
    #[error("mail.transport")]
    Transport,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    #[error("notification.secret_unavailable")]
    SecretUnavailable(#[from] SecretError),
    #[error("notification.delivery_failed")]
    Delivery(#[from] MailError),
    #[error("notification.invalid_subject_template")]
    InvalidSubjectTemplate,
}
