use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body returned by every endpoint
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error family, e.g. "ValidationError"
    pub name: String,
    /// Code-style identifier, e.g. "secret.not_found"
    pub message: String,
}

impl ErrorResponse {
    pub fn json(name: &str, message: &str) -> Json<Self> {
        Json(Self {
            name: name.to_string(),
            message: message.to_string(),
        })
    }
}

/// Maps a domain error onto an HTTP status and body.
pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
