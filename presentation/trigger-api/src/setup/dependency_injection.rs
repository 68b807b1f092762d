use std::sync::Arc;

use firestore::app::FirebaseApp;
use firestore::client::FirestoreClient;
use firestore::repository::DocumentRepositoryFirestore;
use logger::TracingLogger;
use mailer::smtp::SmtpMailSender;

use business::application::notification::dispatch_email::DispatchEmailUseCaseImpl;
use business::application::notification::fetch_secret::FetchSecretUseCaseImpl;
use business::application::notification::notify_watched_field::NotifyWatchedFieldUseCaseImpl;
use business::application::notification::route_event::RouteDocumentEventUseCaseImpl;
use business::domain::document::repository::DocumentRepository;
use business::domain::logger::Logger;
use business::domain::notification::model::{MailSettings, SecretLocation, WatchedField};
use business::domain::notification::services::MailSender;
use business::domain::notification::use_cases::notify_watched_field::NotifyWatchedFieldUseCase;

use crate::api::events::routes::EventApi;
use crate::api::health::routes::Api as HealthApi;
use crate::api::security::PushTokenVerifier;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub event_api: EventApi,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig, firebase: &'static FirebaseApp) -> anyhow::Result<Self> {
        let health_api = HealthApi::new(firebase.project_id());

        // Infrastructure adapters
        let repository = Arc::new(DocumentRepositoryFirestore::new(FirestoreClient::new(
            firebase,
        )));
        let mailer = Arc::new(SmtpMailSender::new(
            config.mail.smtp_host.clone(),
            config.mail.smtp_port,
        ));

        let verifier = match &config.auth.push {
            Some(push) => Some(Arc::new(PushTokenVerifier::new(push.clone()))),
            None => {
                tracing::warn!("Push token verification is disabled for /events");
                None
            }
        };

        let event_api = wire_event_api(
            repository,
            mailer,
            config.mail.settings.clone(),
            config.secret.location.clone(),
            verifier,
        )?;

        Ok(Self {
            health_api,
            event_api,
        })
    }
}

/// Builds the event pipeline on top of the given adapters.
pub fn wire_event_api(
    repository: Arc<dyn DocumentRepository>,
    mailer: Arc<dyn MailSender>,
    settings: MailSettings,
    location: SecretLocation,
    verifier: Option<Arc<PushTokenVerifier>>,
) -> anyhow::Result<EventApi> {
    let logger = |component: &'static str| -> Arc<dyn Logger> {
        Arc::new(TracingLogger::new(component))
    };

    let secret_fetcher = Arc::new(FetchSecretUseCaseImpl {
        repository,
        location,
        logger: logger("secret"),
    });
    let dispatcher = Arc::new(DispatchEmailUseCaseImpl {
        secret_fetcher,
        mailer,
        settings,
        logger: logger("dispatch"),
    });

    let notifiers: Vec<Arc<dyn NotifyWatchedFieldUseCase>> = vec![
        Arc::new(NotifyWatchedFieldUseCaseImpl {
            watch: WatchedField::feedback_created()?,
            dispatcher: dispatcher.clone(),
            logger: logger("trigger"),
        }),
        Arc::new(NotifyWatchedFieldUseCaseImpl {
            watch: WatchedField::issue_written()?,
            dispatcher,
            logger: logger("trigger"),
        }),
    ];

    let route_use_case = Arc::new(RouteDocumentEventUseCaseImpl {
        notifiers,
        logger: logger("events"),
    });

    Ok(EventApi::new(route_use_case, verifier))
}
