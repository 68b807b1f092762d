use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::document::model::FieldValue;
use crate::domain::document::repository::DocumentRepository;
use crate::domain::logger::Logger;
use crate::domain::notification::errors::SecretError;
use crate::domain::notification::model::SecretLocation;
use crate::domain::notification::use_cases::fetch_secret::FetchSecretUseCase;

/// Reads the mail password from the secret store on every call.
pub struct FetchSecretUseCaseImpl {
    pub repository: Arc<dyn DocumentRepository>,
    pub location: SecretLocation,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl FetchSecretUseCase for FetchSecretUseCaseImpl {
    async fn execute(&self) -> Result<SecretString, SecretError> {
        self.logger.debug(&format!(
            "Fetching secret field '{}' from {}",
            self.location.field, self.location.document
        ));

        let document = self
            .repository
            .get(&self.location.document)
            .await
            .map_err(|err| {
                self.logger.error(&format!(
                    "Secret document {} unavailable: {}",
                    self.location.document, err
                ));
                SecretError::from(err)
            })?;

        match document.field(&self.location.field) {
            Some(FieldValue::String(password)) => Ok(SecretString::from(password.clone())),
            Some(other) => {
                self.logger.error(&format!(
                    "Secret field '{}' has type {}, expected string",
                    self.location.field,
                    other.kind()
                ));
                Err(SecretError::FieldMissing)
            }
            None => {
                self.logger.error(&format!(
                    "Secret field '{}' missing from {}",
                    self.location.field, self.location.document
                ));
                Err(SecretError::FieldMissing)
            }
        }
    }
}
