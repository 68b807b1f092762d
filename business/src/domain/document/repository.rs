use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::Document;
use super::path::DocumentPath;

/// Read access to the document store.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Fails with `RepositoryError::NotFound` when no document exists at `path`.
    async fn get(&self, path: &DocumentPath) -> Result<Document, RepositoryError>;
}
