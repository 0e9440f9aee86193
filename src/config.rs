//! Runtime configuration, read from the process environment.
//!
//! A `.env` file in the working directory is honoured for local development.
//! Upstream credentials are optional here: the token route reports their
//! absence when it is called.

use std::{env, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub quran_base_url: String,
    pub quran_auth_url: String,
    pub quran_client_id: Option<String>,
    pub quran_client_secret: Option<String>,
    pub alquran_base_url: String,
    pub aladhan_base_url: String,
    pub hadith_base_url: String,
    pub hadith_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|err| ConfigError::InvalidValue("PORT".into(), err.to_string()))?,
            Err(_) => 8080,
        };

        let data_path = env::var("WERD_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/werd-storage.json"));

        Ok(Self {
            port,
            data_path,
            quran_base_url: url_var("QURAN_BASE_URL", "https://apis.quran.foundation"),
            quran_auth_url: url_var("QURAN_AUTH_URL", "https://oauth2.quran.foundation"),
            quran_client_id: optional_var("QURAN_CLIENT_ID"),
            quran_client_secret: optional_var("QURAN_CLIENT_SECRET"),
            alquran_base_url: url_var("ALQURAN_BASE_URL", "https://api.alquran.cloud/v1"),
            aladhan_base_url: url_var("ALADHAN_BASE_URL", "https://api.aladhan.com/v1"),
            hadith_base_url: url_var("HADITH_BASE_URL", "https://hadithapi.com/api"),
            hadith_api_key: optional_var("HADITH_API_KEY"),
        })
    }

    pub fn has_quran_credentials(&self) -> bool {
        self.quran_client_id.is_some() && self.quran_client_secret.is_some()
    }
}

fn url_var(name: &str, default: &str) -> String {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value.trim_end_matches('/').to_string()
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
impl Config {
    /// Every upstream points at a closed local port.
    pub fn offline(data_path: PathBuf) -> Self {
        let unreachable = "http://127.0.0.1:9".to_string();
        Self {
            port: 0,
            data_path,
            quran_base_url: unreachable.clone(),
            quran_auth_url: unreachable.clone(),
            quran_client_id: None,
            quran_client_secret: None,
            alquran_base_url: unreachable.clone(),
            aladhan_base_url: unreachable.clone(),
            hadith_base_url: unreachable,
            hadith_api_key: None,
        }
    }
}
