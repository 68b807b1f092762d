use async_trait::async_trait;
use reqwest::StatusCode;

use business::domain::document::model::Document;
use business::domain::document::path::DocumentPath;
use business::domain::document::repository::DocumentRepository;
use business::domain::errors::RepositoryError;

use crate::client::FirestoreClient;
use crate::wire::FirestoreDocument;

pub struct DocumentRepositoryFirestore {
    client: FirestoreClient,
}

impl DocumentRepositoryFirestore {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentRepository for DocumentRepositoryFirestore {
    async fn get(&self, path: &DocumentPath) -> Result<Document, RepositoryError> {
        let url = self.client.document_url(path)?;

        let mut request = self.client.client.get(url);
        if let Some(auth) = self.client.auth_header().await? {
            request = request.header("Authorization", auth);
        }

        let response = request
            .send()
            .await
            .map_err(|_| RepositoryError::Unreachable)?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(RepositoryError::NotFound),
            status if !status.is_success() => return Err(RepositoryError::Unreachable),
            _ => {}
        }

        let document: FirestoreDocument = response
            .json()
            .await
            .map_err(|_| RepositoryError::Malformed)?;

        let document = document
            .into_domain()
            .map_err(|_| RepositoryError::Malformed)?;

        if &document.path != path {
            return Err(RepositoryError::Malformed);
        }

        Ok(document)
    }
}
