//! Service-account key file parsing.

use serde::Deserialize;

use crate::error::SheetsError;

/// Default OAuth2 token endpoint for Google service accounts.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The subset of a Google service-account JSON key used for token minting.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text (the content of the downloaded key file).
    pub fn from_json(raw: &str) -> Result<Self, SheetsError> {
        let key: Self = serde_json::from_str(raw.trim())
            .map_err(|e| SheetsError::Credential(e.to_string()))?;
        if key.client_email.trim().is_empty() {
            return Err(SheetsError::Credential("client_email is empty".into()));
        }
        if key.private_key.trim().is_empty() {
            return Err(SheetsError::Credential("private_key is empty".into()));
        }
        Ok(key)
    }
}

// Hand-written so the private key never reaches logs.
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}
