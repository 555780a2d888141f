use std::time::Duration;
use std::time::Instant;

use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::jwk::JwkSet;
use reqwest::Client;
use tokio::sync::RwLock;

use super::errors::KeyStoreError;

/// Network timeout for a single JWKS document fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Cached keys are considered fresh for this long. Providers rotate signing
/// keys infrequently.
const REFRESH_INTERVAL: Duration = Duration::from_secs(3600);

/// Minimum age before an unknown key id forces a refetch. Bounds the fetch
/// rate when tokens reference key ids the provider never published.
const RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Cache of an identity provider's published signing keys.
///
/// Read-mostly: concurrent verifications share the cached JWKS document
/// behind an `RwLock`; a single writer refreshes it when it is missing,
/// stale, or does not know a requested key id.
pub struct KeyStore {
    http: Client,
    jwks_url: String,
    cached: RwLock<Option<CachedKeys>>,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

impl CachedKeys {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < REFRESH_INTERVAL
    }
}

impl KeyStore {
    /// Create a key store for a provider's JWKS endpoint.
    ///
    /// # Errors
    /// * `HttpClient` - HTTP client construction failed
    pub fn new(jwks_url: impl Into<String>) -> Result<Self, KeyStoreError> {
        let http = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| KeyStoreError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            jwks_url: jwks_url.into(),
            cached: RwLock::new(None),
        })
    }

    /// Resolve the signing key for a key id.
    ///
    /// Served from the cache when possible; refetches the JWKS document when
    /// the cache is empty, stale, or does not contain the id.
    ///
    /// # Errors
    /// * `FetchFailed` - Network error, timeout, or malformed JWKS document
    /// * `UnknownKeyId` - Provider does not publish a key with this id
    pub async fn key_for(&self, kid: &str) -> Result<Jwk, KeyStoreError> {
        if let Some(jwk) = self.cached_key(kid).await {
            return Ok(jwk);
        }

        // Single-writer refresh; readers queue here only while a fetch is in
        // flight. Re-check under the write lock: another task may have
        // refreshed while this one waited.
        let mut cached = self.cached.write().await;
        let refresh_needed = match cached.as_ref() {
            Some(entry) => {
                let age = entry.fetched_at.elapsed();
                age >= REFRESH_INTERVAL
                    || (entry.keys.find(kid).is_none() && age >= RETRY_INTERVAL)
            }
            None => true,
        };

        if refresh_needed {
            let keys = self.fetch().await?;
            *cached = Some(CachedKeys {
                keys,
                fetched_at: Instant::now(),
            });
        }

        cached
            .as_ref()
            .and_then(|entry| entry.keys.find(kid))
            .cloned()
            .ok_or_else(|| KeyStoreError::UnknownKeyId(kid.to_string()))
    }

    async fn cached_key(&self, kid: &str) -> Option<Jwk> {
        let cached = self.cached.read().await;
        let entry = cached.as_ref()?;

        if !entry.is_fresh() {
            return None;
        }
        entry.keys.find(kid).cloned()
    }

    async fn fetch(&self) -> Result<JwkSet, KeyStoreError> {
        tracing::debug!(url = %self.jwks_url, "Refreshing provider signing keys");

        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| KeyStoreError::FetchFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| KeyStoreError::FetchFailed(e.to_string()))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| KeyStoreError::FetchFailed(e.to_string()))
    }
}
