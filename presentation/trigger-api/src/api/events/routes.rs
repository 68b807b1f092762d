use std::sync::Arc;

use poem_openapi::{OpenApi, param::Header, payload::Json};
use serde_json::Value;

use business::domain::notification::use_cases::route_event::RouteDocumentEventUseCase;
use firestore::event::FirestoreEvent;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::events::dto::EventReceiptResponse;
use crate::api::security::PushTokenVerifier;
use crate::api::tags::ApiTags;

pub struct EventApi {
    route_use_case: Arc<dyn RouteDocumentEventUseCase>,
    verifier: Option<Arc<PushTokenVerifier>>,
}

impl EventApi {
    /// Without a verifier every caller is accepted.
    pub fn new(
        route_use_case: Arc<dyn RouteDocumentEventUseCase>,
        verifier: Option<Arc<PushTokenVerifier>>,
    ) -> Self {
        Self {
            route_use_case,
            verifier,
        }
    }
}

/// Document event intake
///
/// Receives Firestore document events pushed by the platform and runs every
/// configured notification trigger against them.
#[OpenApi]
impl EventApi {
    /// Receive a document event
    ///
    /// Accepts the legacy Firestore event body (`eventId`, `value`, `oldValue`).
    /// The push OIDC token goes in `Authorization: Bearer`.
    /// A non-success status tells the platform the delivery failed.
    #[oai(path = "/events", method = "post", tag = "ApiTags::Events")]
    async fn receive_event(
        &self,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
        body: Json<Value>,
    ) -> ReceiveEventResponse {
        if let Some(verifier) = &self.verifier
            && let Err(err) = verifier.verify_header(authorization.0.as_deref()).await
        {
            tracing::warn!(error = %err, "Rejected unauthenticated event");
            let (status, json) = err.into_error_response();
            return match status.as_u16() {
                401 => ReceiveEventResponse::Unauthorized(json),
                _ => ReceiveEventResponse::InternalError(json),
            };
        }

        let event: FirestoreEvent = match serde_json::from_value(body.0) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "Rejected malformed event payload");
                return ReceiveEventResponse::BadRequest(ErrorResponse::json(
                    "ValidationError",
                    "event.invalid_payload",
                ));
            }
        };

        let event_id = event.event_id.clone();
        let change = match event.into_change() {
            Ok(change) => change,
            Err(err) => {
                let (_, json) = err.into_error_response();
                return ReceiveEventResponse::BadRequest(json);
            }
        };

        let path = change.path().to_string();
        let kind = change.kind();

        match self.route_use_case.execute(change).await {
            Ok(reports) => ReceiveEventResponse::Ok(Json(EventReceiptResponse {
                event_id,
                path,
                change: kind.into(),
                outcomes: reports.into_iter().map(Into::into).collect(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    502 => ReceiveEventResponse::BadGateway(json),
                    _ => ReceiveEventResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ReceiveEventResponse {
    #[oai(status = 200)]
    Ok(Json<EventReceiptResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use poem::{Route, test::TestClient};
    use poem_openapi::OpenApiService;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use business::domain::document::model::{Document, FieldValue};
    use business::domain::document::path::DocumentPath;
    use business::domain::document::repository::DocumentRepository;
    use business::domain::errors::RepositoryError;
    use business::domain::notification::errors::MailError;
    use business::domain::notification::model::{
        EmailMessage, MailCredentials, MailSettings, SecretLocation,
    };
    use business::domain::notification::services::MailSender;
    use business::domain::notification::subject::{DEFAULT_SUBJECT_TEMPLATE, SubjectTemplate};
    use secrecy::ExposeSecret;

    use crate::api::security::test_support;
    use crate::setup::dependency_injection::wire_event_api;

    const FEEDBACK: &str = "projects/flight-lab/databases/(default)/documents/feedbacks/abc123";
    const ISSUE: &str = "projects/flight-lab/databases/(default)/documents/known_issues/user_input";

    struct InMemoryRepository {
        documents: HashMap<String, Document>,
    }

    impl InMemoryRepository {
        fn empty() -> Self {
            Self {
                documents: HashMap::new(),
            }
        }

        fn with_password(password: &str) -> Self {
            let path = DocumentPath::new("secret/emailPassword").unwrap();
            let fields = HashMap::from([(
                "password".to_string(),
                FieldValue::String(password.to_string()),
            )]);
            Self {
                documents: HashMap::from([(path.to_string(), Document::new(path, fields))]),
            }
        }
    }

    #[async_trait]
    impl DocumentRepository for InMemoryRepository {
        async fn get(&self, path: &DocumentPath) -> Result<Document, RepositoryError> {
            self.documents
                .get(path.as_str())
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, EmailMessage)>>,
    }

    impl RecordingMailer {
        fn sent(&self) -> Vec<(String, EmailMessage)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailSender for RecordingMailer {
        async fn send(
            &self,
            credentials: &MailCredentials,
            message: &EmailMessage,
        ) -> Result<(), MailError> {
            self.sent.lock().unwrap().push((
                credentials.password.expose_secret().to_string(),
                message.clone(),
            ));
            Ok(())
        }
    }

    fn client(repository: InMemoryRepository, mailer: Arc<RecordingMailer>) -> TestClient<Route> {
        client_with_verifier(repository, mailer, None)
    }

    fn client_with_verifier(
        repository: InMemoryRepository,
        mailer: Arc<RecordingMailer>,
        verifier: Option<Arc<PushTokenVerifier>>,
    ) -> TestClient<Route> {
        let settings = MailSettings {
            sender: "noreply@example.com".to_string(),
            recipient: "team@example.com".to_string(),
            subject: SubjectTemplate::new(DEFAULT_SUBJECT_TEMPLATE, "FlightLab").unwrap(),
        };
        let location = SecretLocation {
            document: DocumentPath::new("secret/emailPassword").unwrap(),
            field: "password".to_string(),
        };
        let api = wire_event_api(Arc::new(repository), mailer, settings, location, verifier).unwrap();
        let service = OpenApiService::new(api, "test", "0.1.0");
        TestClient::new(Route::new().nest("/", service))
    }

    #[tokio::test]
    async fn should_email_feedback_text_when_feedback_is_created() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = client(InMemoryRepository::with_password("app-password"), mailer.clone());

        let response = client
            .post("/events")
            .body_json(&json!({
                "eventId": "e-1",
                "oldValue": {},
                "value": {"name": FEEDBACK, "fields": {"text": {"stringValue": "button broken"}}}
            }))
            .send()
            .await;

        response.assert_status_is_ok();
        let json = response.json().await;
        let body = json.value().object();
        body.get("event_id").assert_string("e-1");
        body.get("path").assert_string("feedbacks/abc123");
        body.get("change").assert_string("created");
        let outcomes = body.get("outcomes").object_array();
        outcomes[0].get("trigger").assert_string("feedback_created");
        outcomes[0].get("outcome").assert_string("dispatched");
        outcomes[1].get("outcome").assert_string("ignored");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "app-password");
        assert_eq!(sent[0].1.recipient, "team@example.com");
        assert_eq!(sent[0].1.subject, "[FlightLab] New feedback received");
        assert_eq!(sent[0].1.body, "button broken");
    }

    #[tokio::test]
    async fn should_email_issue_title_on_update() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = client(InMemoryRepository::with_password("app-password"), mailer.clone());

        let response = client
            .post("/events")
            .body_json(&json!({
                "oldValue": {"name": ISSUE, "fields": {"title": {"stringValue": "Login fails"}}},
                "value": {"name": ISSUE, "fields": {"title": {"stringValue": "Login fails on Android"}}}
            }))
            .send()
            .await;

        response.assert_status_is_ok();
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.subject, "[FlightLab] New issue received");
        assert_eq!(sent[0].1.body, "Login fails on Android");
    }

    #[tokio::test]
    async fn should_skip_issue_written_without_title() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = client(InMemoryRepository::with_password("app-password"), mailer.clone());

        let response = client
            .post("/events")
            .body_json(&json!({"value": {"name": ISSUE, "fields": {}}}))
            .send()
            .await;

        response.assert_status_is_ok();
        let json = response.json().await;
        let outcomes = json.value().object().get("outcomes").object_array();
        outcomes[1].get("trigger").assert_string("issue_written");
        outcomes[1].get("outcome").assert_string("skipped");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn should_fail_without_sending_when_secret_is_missing() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = client(InMemoryRepository::empty(), mailer.clone());

        let response = client
            .post("/events")
            .body_json(&json!({
                "value": {"name": FEEDBACK, "fields": {"text": {"stringValue": "button broken"}}}
            }))
            .send()
            .await;

        response.assert_status(poem::http::StatusCode::INTERNAL_SERVER_ERROR);
        let json = response.json().await;
        json.value().object().get("message").assert_string("secret.not_found");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn should_reject_event_without_any_document() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = client(InMemoryRepository::with_password("app-password"), mailer.clone());

        let response = client
            .post("/events")
            .body_json(&json!({"eventId": "e-2", "value": {}, "oldValue": {}}))
            .send()
            .await;

        response.assert_status(poem::http::StatusCode::BAD_REQUEST);
        let json = response.json().await;
        json.value().object().get("message").assert_string("document.empty_change");
    }

    #[tokio::test]
    async fn should_reject_payload_that_is_not_an_event() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = client(InMemoryRepository::with_password("app-password"), mailer);

        let response = client
            .post("/events")
            .body_json(&json!({"value": "feedbacks/abc123"}))
            .send()
            .await;

        response.assert_status(poem::http::StatusCode::BAD_REQUEST);
        let json = response.json().await;
        json.value().object().get("message").assert_string("event.invalid_payload");
    }

    fn verified_client(mailer: Arc<RecordingMailer>) -> TestClient<Route> {
        let verifier = PushTokenVerifier::with_keys(
            test_support::settings(Some(test_support::INVOKER)),
            &test_support::jwks(),
        );
        client_with_verifier(
            InMemoryRepository::with_password("app-password"),
            mailer,
            Some(Arc::new(verifier)),
        )
    }

    fn feedback_event() -> serde_json::Value {
        json!({
            "value": {"name": FEEDBACK, "fields": {"text": {"stringValue": "button broken"}}}
        })
    }

    #[tokio::test]
    async fn should_reject_event_without_push_token_when_verification_is_on() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = verified_client(mailer.clone());

        let response = client.post("/events").body_json(&feedback_event()).send().await;

        response.assert_status(poem::http::StatusCode::UNAUTHORIZED);
        let json = response.json().await;
        json.value().object().get("message").assert_string("auth.missing_token");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn should_reject_event_signed_for_other_audience() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = verified_client(mailer.clone());
        let mut claims = test_support::valid_claims();
        claims.aud = "https://elsewhere.example.com".to_string();
        let token = test_support::sign(&claims, test_support::KID);

        let response = client
            .post("/events")
            .header("Authorization", format!("Bearer {}", token))
            .body_json(&feedback_event())
            .send()
            .await;

        response.assert_status(poem::http::StatusCode::UNAUTHORIZED);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn should_process_event_with_valid_push_token() {
        let mailer = Arc::new(RecordingMailer::default());
        let client = verified_client(mailer.clone());
        let token = test_support::sign(&test_support::valid_claims(), test_support::KID);

        let response = client
            .post("/events")
            .header("Authorization", format!("Bearer {}", token))
            .body_json(&feedback_event())
            .send()
            .await;

        response.assert_status_is_ok();
        assert_eq!(mailer.sent().len(), 1);
    }
}
