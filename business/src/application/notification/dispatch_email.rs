use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::model::{EmailMessage, MailCredentials, MailSettings};
use crate::domain::notification::services::MailSender;
use crate::domain::notification::use_cases::dispatch_email::{
    DispatchEmailParams, DispatchEmailUseCase,
};
use crate::domain::notification::use_cases::fetch_secret::FetchSecretUseCase;

pub struct DispatchEmailUseCaseImpl {
    pub secret_fetcher: Arc<dyn FetchSecretUseCase>,
    pub mailer: Arc<dyn MailSender>,
    pub settings: MailSettings,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DispatchEmailUseCase for DispatchEmailUseCaseImpl {
    async fn execute(&self, params: DispatchEmailParams) -> Result<(), NotificationError> {
        // The send must not start before the password is known.
        let password = self.secret_fetcher.execute().await?;

        let credentials = MailCredentials {
            sender: self.settings.sender.clone(),
            password,
        };
        let message = EmailMessage {
            recipient: self.settings.recipient.clone(),
            subject: self.settings.subject.render(params.category),
            body: params.body,
        };

        self.logger.info(&format!(
            "Sending {} email to {}",
            params.category, message.recipient
        ));

        self.mailer
            .send(&credentials, &message)
            .await
            .map_err(|err| {
                self.logger
                    .error(&format!("Failed to send {} email: {}", params.category, err));
                NotificationError::from(err)
            })?;

        self.logger.info("Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::errors::{MailError, SecretError};
    use crate::domain::notification::model::Category;
    use crate::domain::notification::subject::{DEFAULT_SUBJECT_TEMPLATE, SubjectTemplate};
    use mockall::mock;
    use secrecy::{ExposeSecret, SecretString};

    mock! {
        pub SecretFetcher {}

        #[async_trait]
        impl FetchSecretUseCase for SecretFetcher {
            async fn execute(&self) -> Result<SecretString, SecretError>;
        }
    }

    mock! {
        pub Mailer {}

        #[async_trait]
        impl MailSender for Mailer {
            async fn send(
                &self,
                credentials: &MailCredentials,
                message: &EmailMessage,
            ) -> Result<(), MailError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn settings() -> MailSettings {
        MailSettings {
            sender: "noreply@example.com".to_string(),
            recipient: "team@example.com".to_string(),
            subject: SubjectTemplate::new(DEFAULT_SUBJECT_TEMPLATE, "FlightLab").unwrap(),
        }
    }

    fn fetcher_returning(password: &'static str) -> MockSecretFetcher {
        let mut fetcher = MockSecretFetcher::new();
        fetcher
            .expect_execute()
            .times(1)
            .returning(move || Ok(SecretString::from(password.to_string())));
        fetcher
    }

    #[tokio::test]
    async fn should_send_feedback_email_with_templated_subject_and_verbatim_body() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|credentials, message| {
                credentials.sender == "noreply@example.com"
                    && credentials.password.expose_secret() == "pw"
                    && message.recipient == "team@example.com"
                    && message.subject == "[FlightLab] New feedback received"
                    && message.body == "  button broken\n"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = DispatchEmailUseCaseImpl {
            secret_fetcher: Arc::new(fetcher_returning("pw")),
            mailer: Arc::new(mailer),
            settings: settings(),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DispatchEmailParams {
                category: Category::Feedback,
                body: "  button broken\n".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_use_issue_subject_when_category_is_issue() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|_, message| message.subject == "[FlightLab] New issue received")
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = DispatchEmailUseCaseImpl {
            secret_fetcher: Arc::new(fetcher_returning("pw")),
            mailer: Arc::new(mailer),
            settings: settings(),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DispatchEmailParams {
                category: Category::Issue,
                body: "Login fails".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_not_contact_mail_provider_when_secret_is_unavailable() {
        let mut fetcher = MockSecretFetcher::new();
        fetcher
            .expect_execute()
            .returning(|| Err(SecretError::NotFound));

        let mut mailer = MockMailer::new();
        mailer.expect_send().never();

        let use_case = DispatchEmailUseCaseImpl {
            secret_fetcher: Arc::new(fetcher),
            mailer: Arc::new(mailer),
            settings: settings(),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DispatchEmailParams {
                category: Category::Feedback,
                body: "hello".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(NotificationError::SecretUnavailable(SecretError::NotFound))
        ));
    }

    #[tokio::test]
    async fn should_propagate_delivery_error_when_provider_rejects_credentials() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_, _| Err(MailError::Authentication));

        let use_case = DispatchEmailUseCaseImpl {
            secret_fetcher: Arc::new(fetcher_returning("wrong")),
            mailer: Arc::new(mailer),
            settings: settings(),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DispatchEmailParams {
                category: Category::Feedback,
                body: "hello".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(NotificationError::Delivery(MailError::Authentication))
        ));
    }
}
