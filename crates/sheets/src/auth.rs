//! OAuth2 access tokens for a Google service account.
//!
//! Tokens are obtained with the JWT-bearer grant: an RS256-signed assertion
//! naming the account and scope is exchanged at the key's `token_uri` for a
//! short-lived bearer token. The token is cached and reused until it is
//! within [`REFRESH_MARGIN_SECS`] of expiry.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

/// Read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Grant type for service-account assertions.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh a cached token this many seconds before it expires.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Claims of the signed assertion sent to the token endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    /// UTC Unix timestamp.
    expires_at: i64,
}

/// Mints and caches access tokens for one service account.
pub struct TokenProvider {
    client: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Build a provider for `key`, validating its private key up front.
    pub fn new(client: reqwest::Client, key: ServiceAccountKey) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::Credential(format!("private_key is not a valid RSA PEM: {e}")))?;

        Ok(Self {
            client,
            key,
            encoding_key,
            scope: SPREADSHEETS_SCOPE.to_string(),
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Sign an assertion valid from `now` (UTC Unix timestamp).
    pub fn assertion(&self, now: i64) -> Result<String, SheetsError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    /// Return a valid access token, fetching a new one when needed.
    ///
    /// Concurrent callers wait on the same refresh instead of each
    /// requesting their own token.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        let now = chrono::Utc::now().timestamp();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - REFRESH_MARGIN_SECS > now {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch_token(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Drop the cached token so the next call fetches a fresh one.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn fetch_token(&self, now: i64) -> Result<CachedToken, SheetsError> {
        let assertion = self.assertion(now)?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = crate::api::error_body(response).await;
            tracing::warn!(status = status.as_u16(), "Token endpoint rejected assertion");
            return Err(SheetsError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "Fetched service account access token"
        );

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}
