use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use folderwalk_core::RemoteAccessError;

use crate::config::ClientConfig;

const TOKEN_SCOPE: &str = "api";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// OAuth2 client-credentials token source with an in-memory cache
#[derive(Debug)]
pub struct TokenProvider {
    token_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<String>>,
}

impl TokenProvider {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: RwLock::new(None),
        }
    }

    /// Cached access token, fetching a new one when none is held
    pub async fn access_token(&self, client: &Client) -> Result<String, RemoteAccessError> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let mut slot = self.token.write().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }
        let token = self.request_token(client).await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next request re-authorizes
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }

    async fn request_token(&self, client: &Client) -> Result<String, RemoteAccessError> {
        debug!(url = %self.token_url, "Requesting access token");

        let response = client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", TOKEN_SCOPE)])
            .send()
            .await
            .map_err(|e| RemoteAccessError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteAccessError::Authentication(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| RemoteAccessError::MalformedResponse(e.to_string()))?;

        debug!(
            token_type = token.token_type.as_deref().unwrap_or("unknown"),
            expires_in = token.expires_in,
            "Access token acquired"
        );
        Ok(token.access_token)
    }
}
