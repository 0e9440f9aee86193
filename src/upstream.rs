//! Shared plumbing for the third-party content APIs.

use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Status(String),

    #[error("Missing {0}")]
    MissingCredentials(&'static str),

    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, UpstreamError>;

pub fn http_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(concat!("werd/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Reads a JSON body, turning non-2xx responses into an error carrying the
/// upstream's own description when it sent one.
pub async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<Value>().await?);
    }

    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Err(UpstreamError::Status(error_message(&body).unwrap_or_else(|| {
        format!(
            "Request failed with status code {}",
            status.as_u16()
        )
    })))
}

pub fn error_message(body: &Value) -> Option<String> {
    ["error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
