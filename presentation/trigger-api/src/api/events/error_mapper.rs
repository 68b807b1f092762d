use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::document::errors::DocumentError;
use business::domain::notification::errors::{MailError, NotificationError, SecretError};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::AuthError;

impl IntoErrorResponse for AuthError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match self {
            AuthError::CertsUnavailable => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
            _ => (StatusCode::UNAUTHORIZED, "AuthenticationError"),
        };
        (status, ErrorResponse::json(name, &self.to_string()))
    }
}

impl IntoErrorResponse for DocumentError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::BAD_REQUEST,
            ErrorResponse::json("ValidationError", &self.to_string()),
        )
    }
}

impl IntoErrorResponse for NotificationError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            NotificationError::SecretUnavailable(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SecretError",
                match err {
                    SecretError::NotFound => "secret.not_found",
                    SecretError::FieldMissing => "secret.field_missing",
                    SecretError::Store(_) => "secret.store_unavailable",
                },
            ),
            NotificationError::Delivery(err) => (
                StatusCode::BAD_GATEWAY,
                "DeliveryError",
                match err {
                    MailError::InvalidAddress(_) => "mail.invalid_address",
                    MailError::Authentication => "mail.authentication_failed",
                    MailError::Rejected => "mail.rejected",
                    MailError::Transport => "mail.transport",
                },
            ),
            NotificationError::InvalidSubjectTemplate => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ConfigurationError",
                "notification.invalid_subject_template",
            ),
        };

        (status, ErrorResponse::json(name, message))
    }
}
