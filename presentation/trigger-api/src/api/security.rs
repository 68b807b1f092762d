use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;

use crate::config::auth_config::PushAuth;

const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];
const CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("auth.missing_token")]
    MissingToken,
    #[error("auth.invalid_token_header")]
    InvalidHeader,
    #[error("auth.missing_kid")]
    MissingKid,
    #[error("auth.unknown_kid")]
    UnknownKid,
    #[error("auth.token_validation_failed")]
    Invalid,
    #[error("auth.unexpected_invoker")]
    UnexpectedInvoker,
    #[error("auth.certs_unavailable")]
    CertsUnavailable,
}

#[derive(Debug, Deserialize)]
pub struct PushClaims {
    pub sub: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

struct CachedKeys {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
}

/// Verifies the Google-signed OIDC token that push deliveries carry.
pub struct PushTokenVerifier {
    settings: PushAuth,
    client: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl PushTokenVerifier {
    pub fn new(settings: PushAuth) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
            cache: RwLock::new(None),
        }
    }

    /// Verifies an `Authorization` header value.
    pub async fn verify_header(&self, header: Option<&str>) -> Result<PushClaims, AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;
        self.verify(token).await
    }

    pub async fn verify(&self, token: &str) -> Result<PushClaims, AuthError> {
        let kid = decode_header(token)
            .map_err(|_| AuthError::InvalidHeader)?
            .kid
            .ok_or(AuthError::MissingKid)?;

        let key = match self.cached_key(&kid)? {
            Some(key) => key,
            None => {
                self.refresh_keys().await?;
                self.cached_key(&kid)?.ok_or(AuthError::UnknownKid)?
            }
        };

        self.validate(token, &key)
    }

    fn validate(&self, token: &str, key: &DecodingKey) -> Result<PushClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.settings.audience]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        let claims = decode::<PushClaims>(token, key, &validation)
            .map_err(|err| {
                tracing::warn!(error = %err, "Push token rejected");
                AuthError::Invalid
            })?
            .claims;

        if let Some(expected) = &self.settings.invoker_email {
            let verified_email = claims.email.as_deref().filter(|_| claims.email_verified);
            if verified_email != Some(expected.as_str()) {
                return Err(AuthError::UnexpectedInvoker);
            }
        }

        Ok(claims)
    }

    /// A key from a fresh cache; `None` when the cache is stale or lacks `kid`.
    fn cached_key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        let cache = self.cache.read().map_err(|_| AuthError::CertsUnavailable)?;
        Ok(cache
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < CACHE_TTL)
            .and_then(|cached| cached.keys.get(kid).cloned()))
    }

    async fn refresh_keys(&self) -> Result<(), AuthError> {
        let jwks: JwkSet = self
            .client
            .get(GOOGLE_JWKS_URL)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Failed to fetch Google signing keys");
                AuthError::CertsUnavailable
            })?
            .json()
            .await
            .map_err(|_| AuthError::CertsUnavailable)?;

        self.store_keys(&jwks)
    }

    fn store_keys(&self, jwks: &JwkSet) -> Result<(), AuthError> {
        let keys = jwks
            .keys
            .iter()
            .filter_map(|jwk| {
                let kid = jwk.common.key_id.clone()?;
                DecodingKey::from_jwk(jwk).ok().map(|key| (kid, key))
            })
            .collect();

        let mut cache = self.cache.write().map_err(|_| AuthError::CertsUnavailable)?;
        *cache = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_keys(settings: PushAuth, jwks: &JwkSet) -> Self {
        let verifier = Self::new(settings);
        verifier
            .store_keys(jwks)
            .expect("fresh cache lock cannot be poisoned");
        verifier
    }
}
