/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Wallet Pass Service is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::{error, info, warn};
#[cfg(test)]
use mockall::automock;
use openssl::pkey::PKey;
use serde::{Deserialize, Serialize};
use tokio::sync::{OnceCell, RwLock};

use crate::error::AuthError;
use crate::retry::send_with_single_retry;

pub const WALLET_ISSUER_SCOPE: &str = "https://www.googleapis.com/auth/wallet_object.issuer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_TTL_SECS: u64 = 3600;
// Refresh this long before the registry would reject the token.
const EXPIRY_SLACK_SECS: u64 = 60;

/// Service-account key file contents, the subset the handshake needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountCredentials {
    pub fn from_json(contents: &str) -> Result<Self, AuthError> {
        serde_json::from_str(contents).map_err(|e| AuthError::InvalidCredentials(e.to_string()))
    }

    /// Converts the PEM private key into a jsonwebtoken RS256 key.
    pub fn encoding_key(&self) -> Result<EncodingKey, AuthError> {
        let pkey = PKey::private_key_from_pem(self.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidCredentials(format!("private key: {}", e)))?;
        let rsa = pkey.rsa().map_err(|e| AuthError::InvalidCredentials(format!("not an RSA key: {}", e)))?;
        let der = rsa
            .private_key_to_der()
            .map_err(|e| AuthError::InvalidCredentials(format!("private key der: {}", e)))?;
        Ok(EncodingKey::from_rsa_der(&der))
    }
}

/// Where the service-account credentials come from
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn load(&self) -> Result<ServiceAccountCredentials, AuthError>;
}

/// Reads a service-account JSON key file
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialSource for FileCredentialSource {
    async fn load(&self) -> Result<ServiceAccountCredentials, AuthError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AuthError::MissingCredentials(format!("{}: {}", self.path.display(), e))
        })?;
        ServiceAccountCredentials::from_json(&contents)
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_TTL_SECS
}

#[derive(Clone)]
struct AccessToken {
    value: String,
    expires_at: u64,
}

impl AccessToken {
    fn is_fresh(&self, now: u64) -> bool {
        now + EXPIRY_SLACK_SECS < self.expires_at
    }
}

fn now_secs() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

/// HTTP client bound to one service account; hands out bearer tokens and
/// refreshes them when they are about to expire.
pub struct AuthenticatedClient {
    http: reqwest::Client,
    credentials: ServiceAccountCredentials,
    key: EncodingKey,
    token: RwLock<AccessToken>,
}

impl AuthenticatedClient {
    async fn connect(credentials: ServiceAccountCredentials, timeout: Duration) -> Result<Self, AuthError> {
        let key = credentials.encoding_key()?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let token = exchange(&http, &credentials, &key).await?;
        Ok(Self { http, credentials, key, token: RwLock::new(token) })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn service_account_email(&self) -> &str {
        &self.credentials.client_email
    }

    pub async fn bearer_token(&self) -> Result<String, AuthError> {
        let now = now_secs();
        {
            let token = self.token.read().await;
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }
        let mut token = self.token.write().await;
        if !token.is_fresh(now) {
            *token = exchange(&self.http, &self.credentials, &self.key).await?;
        }
        Ok(token.value.clone())
    }
}

async fn exchange(
    http: &reqwest::Client,
    credentials: &ServiceAccountCredentials,
    key: &EncodingKey,
) -> Result<AccessToken, AuthError> {
    let iat = now_secs();
    let claims = AssertionClaims {
        iss: &credentials.client_email,
        scope: WALLET_ISSUER_SCOPE,
        aud: &credentials.token_uri,
        iat,
        exp: iat + ASSERTION_TTL_SECS,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = credentials.private_key_id.clone();
    let assertion = encode(&header, &claims, key).map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;

    let form = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];
    let response = send_with_single_retry(|| http.post(&credentials.token_uri).form(&form))
        .await
        .map_err(|e| AuthError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| AuthError::Transport(e.to_string()))?;
    if !status.is_success() {
        return Err(AuthError::Rejected { status: status.as_u16(), detail: body });
    }
    let parsed: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| AuthError::Rejected { status: status.as_u16(), detail: format!("bad token response: {}", e) })?;
    Ok(AccessToken { value: parsed.access_token, expires_at: iat + parsed.expires_in })
}

/// Process-wide cache of the authenticated registry client.
///
/// The handshake runs on first use and concurrent first callers wait on the
/// same attempt. Credential failures (missing, invalid, rejected) are cached
/// and returned to every later caller until the process restarts. A transport
/// failure is not cached; the next call runs the handshake again.
pub struct AuthClientCache {
    source: Arc<dyn CredentialSource>,
    timeout: Duration,
    client: OnceCell<Arc<AuthenticatedClient>>,
    failure: OnceCell<AuthError>,
}

impl AuthClientCache {
    pub fn new(source: Arc<dyn CredentialSource>, timeout: Duration) -> Self {
        Self { source, timeout, client: OnceCell::new(), failure: OnceCell::new() }
    }

    pub async fn get_client(&self) -> Result<Arc<AuthenticatedClient>, AuthError> {
        if let Some(e) = self.failure.get() {
            return Err(e.clone());
        }
        self.client
            .get_or_try_init(|| async {
                // a waiter may run after a permanent failure was recorded
                if let Some(e) = self.failure.get() {
                    return Err(e.clone());
                }
                let result = match self.source.load().await {
                    Ok(credentials) => AuthenticatedClient::connect(credentials, self.timeout).await.map(Arc::new),
                    Err(e) => Err(e),
                };
                match &result {
                    Ok(client) => info!("registry client authenticated as {}", client.service_account_email()),
                    Err(e) if e.is_permanent() => {
                        error!("registry authentication failed for good: {}", e);
                        let _ = self.failure.set(e.clone());
                    },
                    Err(e) => warn!("registry authentication failed, will retry on next call: {}", e),
                }
                result
            })
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_handshake_is_cached() {
        let mut source = MockCredentialSource::new();
        source
            .expect_load()
            .times(1)
            .returning(|| Err(AuthError::MissingCredentials("no key file".to_string())));
        let cache = AuthClientCache::new(Arc::new(source), Duration::from_secs(1));

        let first = cache.get_client().await.err();
        let second = cache.get_client().await.err();
        assert_eq!(first, Some(AuthError::MissingCredentials("no key file".to_string())));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_garbage_private_key_is_invalid() {
        let mut source = MockCredentialSource::new();
        source.expect_load().times(1).returning(|| {
            Ok(ServiceAccountCredentials {
                client_email: "svc@demo.iam.gserviceaccount.com".to_string(),
                private_key: "not a pem".to_string(),
                private_key_id: None,
                token_uri: default_token_uri(),
            })
        });
        let cache = AuthClientCache::new(Arc::new(source), Duration::from_secs(1));
        assert!(matches!(cache.get_client().await, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_cached() {
        let mut source = MockCredentialSource::new();
        source.expect_load().times(2).returning(|| Err(AuthError::Transport("connection reset".to_string())));
        let cache = AuthClientCache::new(Arc::new(source), Duration::from_secs(1));

        assert!(matches!(cache.get_client().await, Err(AuthError::Transport(_))));
        assert!(matches!(cache.get_client().await, Err(AuthError::Transport(_))));
    }

    #[test]
    fn test_credentials_default_token_uri() {
        let creds = ServiceAccountCredentials::from_json(
            r#"{"client_email":"a@b.c","private_key":"k","type":"service_account"}"#,
        )
        .unwrap();
        assert_eq!(creds.token_uri, DEFAULT_TOKEN_URI);
        assert!(ServiceAccountCredentials::from_json("{}").is_err());
    }
}
