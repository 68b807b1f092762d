#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    #[error("document.invalid_path")]
    InvalidPath(String),
    #[error("document.invalid_pattern")]
    InvalidPattern(String),
    #[error("document.empty_change")]
    EmptyChange,
    #[error("document.path_mismatch")]
    PathMismatch,
}
