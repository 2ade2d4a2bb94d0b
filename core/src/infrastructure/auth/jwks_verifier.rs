use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use jsonwebtoken::{
    Algorithm, DecodingKey, Validation, decode, decode_header,
    jwk::{Jwk, JwkSet},
};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, warn};

use crate::domain::{
    authentication::{ports::TokenVerifier, value_objects::Identity},
    common::{AuthConfig, entities::app_errors::CoreError},
};

/// Unknown `kid`s trigger at most one key set fetch per interval.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Verifies RS256 bearer tokens against the identity provider's published
/// key set. Keys are cached and refetched when an unknown `kid` shows up,
/// no more than once per minute.
#[derive(Debug, Clone)]
pub struct JwksTokenVerifier {
    client: Client,
    jwks_url: String,
    issuer: String,
    audience: String,
    keys: Arc<RwLock<Option<JwkSet>>>,
    last_refresh: Arc<Mutex<Option<Instant>>>,
}

impl JwksTokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            client: Client::new(),
            jwks_url: config.jwks_url(),
            issuer: config.issuer(),
            audience: config.audience.clone(),
            keys: Arc::new(RwLock::new(None)),
            last_refresh: Arc::new(Mutex::new(None)),
        }
    }

    async fn cached_key(&self, kid: &str) -> Option<Jwk> {
        let keys = self.keys.read().await;
        keys.as_ref()?.find(kid).cloned()
    }

    async fn refresh_keys(&self) -> Result<(), CoreError> {
        let key_set: JwkSet = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                error!("Failed to fetch JWKS: {}", e);
                CoreError::ExternalServiceError(format!("JWKS fetch failed: {}", e))
            })?
            .json()
            .await
            .map_err(|e| {
                error!("Failed to parse JWKS: {}", e);
                CoreError::ExternalServiceError(format!("JWKS parse failed: {}", e))
            })?;

        debug!(keys = key_set.keys.len(), "JWKS refreshed");
        *self.keys.write().await = Some(key_set);
        Ok(())
    }

    async fn key_for(&self, kid: &str) -> Result<Jwk, CoreError> {
        if let Some(key) = self.cached_key(kid).await {
            return Ok(key);
        }

        // Held across the fetch so concurrent misses wait for one refresh.
        let mut last_refresh = self.last_refresh.lock().await;
        if let Some(key) = self.cached_key(kid).await {
            return Ok(key);
        }
        if last_refresh.is_some_and(|at| at.elapsed() < MIN_REFRESH_INTERVAL) {
            return Err(if self.keys.read().await.is_some() {
                warn!("No signing key matches token kid, refresh skipped");
                CoreError::Unauthorized
            } else {
                CoreError::ExternalServiceError("JWKS unavailable".to_string())
            });
        }
        *last_refresh = Some(Instant::now());
        self.refresh_keys().await?;
        drop(last_refresh);

        self.cached_key(kid).await.ok_or_else(|| {
            warn!("No signing key matches token kid");
            CoreError::Unauthorized
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation
    }
}

impl TokenVerifier for JwksTokenVerifier {
    async fn verify(&self, token: String) -> Result<Identity, CoreError> {
        let header = decode_header(&token).map_err(|_| CoreError::Unauthorized)?;
        if header.alg != Algorithm::RS256 {
            return Err(CoreError::Unauthorized);
        }
        let kid = header.kid.ok_or(CoreError::Unauthorized)?;

        let jwk = self.key_for(&kid).await?;
        let key = DecodingKey::from_jwk(&jwk).map_err(|e| {
            error!("Unusable signing key: {}", e);
            CoreError::Unauthorized
        })?;

        let claims = decode::<Claims>(&token, &key, &self.validation())
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                CoreError::Unauthorized
            })?
            .claims;

        Ok(Identity {
            subject: claims.sub,
            email: claims.email,
            name: claims.name,
        })
    }
}
