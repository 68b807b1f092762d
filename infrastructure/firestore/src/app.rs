use once_cell::sync::OnceCell;
use secrecy::SecretString;

pub const DEFAULT_DATABASE_ID: &str = "(default)";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AppError {
    #[error("firebase.already_initialized")]
    AlreadyInitialized,
    #[error("firebase.not_initialized")]
    NotInitialized,
    #[error("firebase.missing_project_id")]
    MissingProjectId,
}

/// Connection parameters for the Firebase project.
#[derive(Debug, Clone)]
pub struct FirebaseOptions {
    pub project_id: String,
    pub database_id: String,
    /// `host:port` of a local Firestore emulator.
    pub emulator_host: Option<String>,
    /// Static OAuth access token; when unset the metadata server is asked.
    pub access_token: Option<SecretString>,
}

impl FirebaseOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: DEFAULT_DATABASE_ID.to_string(),
            emulator_host: None,
            access_token: None,
        }
    }
}

/// Initialized Firebase application.
#[derive(Debug)]
pub struct FirebaseApp {
    options: FirebaseOptions,
}

impl FirebaseApp {
    /// Builds an app without registering it process-wide.
    pub fn new(options: FirebaseOptions) -> Result<Self, AppError> {
        if options.project_id.trim().is_empty() {
            return Err(AppError::MissingProjectId);
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &FirebaseOptions {
        &self.options
    }

    pub fn project_id(&self) -> &str {
        &self.options.project_id
    }
}

static APP: OnceCell<FirebaseApp> = OnceCell::new();

/// Registers the process-wide Firebase app.
///
/// Must be called exactly once, at process start, before any adapter is
/// built. The returned reference is what adapters receive.
pub fn initialize_app(options: FirebaseOptions) -> Result<&'static FirebaseApp, AppError> {
    let app = FirebaseApp::new(options)?;
    APP.set(app).map_err(|_| AppError::AlreadyInitialized)?;
    APP.get().ok_or(AppError::NotInitialized)
}

/// The app registered by `initialize_app`.
pub fn app() -> Result<&'static FirebaseApp, AppError> {
    APP.get().ok_or(AppError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_default_database() {
        let options = FirebaseOptions::new("flight-lab");
        assert_eq!(options.database_id, "(default)");
        assert!(options.emulator_host.is_none());
    }

    #[test]
    fn should_reject_app_without_project_id() {
        let result = FirebaseApp::new(FirebaseOptions::new("  "));
        assert_eq!(result.unwrap_err(), AppError::MissingProjectId);
    }

    // The only test touching the process-wide slot.
    #[test]
    fn should_initialize_app_only_once() {
        assert_eq!(app().unwrap_err(), AppError::NotInitialized);

        let first = initialize_app(FirebaseOptions::new("flight-lab")).unwrap();
        assert_eq!(first.project_id(), "flight-lab");
        assert_eq!(app().unwrap().project_id(), "flight-lab");

        let second = initialize_app(FirebaseOptions::new("other-project"));
        assert_eq!(second.unwrap_err(), AppError::AlreadyInitialized);
        assert_eq!(app().unwrap().project_id(), "flight-lab");
    }
}
