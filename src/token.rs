//! OAuth2 client-credentials exchange against the content API's auth server.

use crate::config::Config;
use crate::upstream::{read_json, Result, UpstreamError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub client_id: String,
}

#[derive(Clone)]
pub struct TokenClient {
    http: Client,
    auth_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl TokenClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            auth_url: config.quran_auth_url.clone(),
            client_id: config.quran_client_id.clone(),
            client_secret: config.quran_client_secret.clone(),
        }
    }

    /// Requests a fresh token with scope `content`. Tokens are not cached;
    /// every proxied call performs its own exchange.
    pub async fn access_token(&self) -> Result<AccessToken> {
        let result = self.exchange().await;
        if let Err(err) = &result {
            error!("error getting access token: {err}");
        }
        result
    }

    async fn exchange(&self) -> Result<AccessToken> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(UpstreamError::MissingCredentials("QURAN_CLIENT_ID"))?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or(UpstreamError::MissingCredentials("QURAN_CLIENT_SECRET"))?;

        let response = self
            .http
            .post(format!("{}/oauth2/token", self.auth_url))
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "content")])
            .send()
            .await?;

        let body = read_json(response).await?;
        let access_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| UpstreamError::Malformed("missing access_token".into()))?;

        Ok(AccessToken {
            access_token: access_token.to_string(),
            client_id: client_id.to_string(),
        })
    }
}
