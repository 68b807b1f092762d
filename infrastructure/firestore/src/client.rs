use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use business::domain::document::path::DocumentPath;
use business::domain::errors::RepositoryError;

use crate::app::FirebaseApp;

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// How requests to Firestore are authorized.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// Emulator: no credentials.
    Anonymous,
    Static(SecretString),
    /// GCE/Cloud Run metadata server, asked on every request.
    Metadata,
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

/// Shared Firestore REST client configuration.
pub struct FirestoreClient {
    pub client: Client,
    pub base_url: String,
    pub project_id: String,
    pub database_id: String,
    pub token_source: TokenSource,
}

impl FirestoreClient {
    pub fn new(app: &FirebaseApp) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        let options = app.options();
        let (base_url, token_source) = match (&options.emulator_host, &options.access_token) {
            (Some(host), _) => (format!("http://{}/v1", host), TokenSource::Anonymous),
            (None, Some(token)) => (
                FIRESTORE_BASE_URL.to_string(),
                TokenSource::Static(token.clone()),
            ),
            (None, None) => (FIRESTORE_BASE_URL.to_string(), TokenSource::Metadata),
        };

        Self {
            client,
            base_url,
            project_id: options.project_id.clone(),
            database_id: options.database_id.clone(),
            token_source,
        }
    }

    /// Returns the REST URL of a single document, each segment percent-encoded.
    pub fn document_url(&self, path: &DocumentPath) -> Result<Url, RepositoryError> {
        let mut url = Url::parse(&self.base_url).map_err(|_| RepositoryError::Unreachable)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RepositoryError::Unreachable)?;
            segments
                .pop_if_empty()
                .extend([
                    "projects",
                    self.project_id.as_str(),
                    "databases",
                    self.database_id.as_str(),
                    "documents",
                ])
                .extend(path.segments());
        }
        Ok(url)
    }

    /// Builds the authorization header value, if any.
    pub async fn auth_header(&self) -> Result<Option<String>, RepositoryError> {
        match &self.token_source {
            TokenSource::Anonymous => Ok(None),
            TokenSource::Static(token) => Ok(Some(format!("Bearer {}", token.expose_secret()))),
            TokenSource::Metadata => {
                let response = self
                    .client
                    .get(METADATA_TOKEN_URL)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|_| RepositoryError::Unreachable)?;

                if !response.status().is_success() {
                    return Err(RepositoryError::Unreachable);
                }

                let token: MetadataToken = response
                    .json()
                    .await
                    .map_err(|_| RepositoryError::Unreachable)?;
                Ok(Some(format!("Bearer {}", token.access_token)))
            }
        }
    }
}
