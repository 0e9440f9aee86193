use crate::aladhan::AladhanClient;
use crate::alquran::AlQuranClient;
use crate::audio::Player;
use crate::config::Config;
use crate::content::ContentClient;
use crate::errors::AppError;
use crate::hadith::HadithClient;
use crate::models::AppData;
use crate::storage::persist_data;
use crate::upstream::{http_client, UpstreamError};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub player: Arc<Mutex<Player>>,
    pub content: ContentClient,
    pub alquran: AlQuranClient,
    pub aladhan: AladhanClient,
    pub hadith: HadithClient,
}

impl AppState {
    pub fn new(config: &Config, data_path: PathBuf, data: AppData) -> Result<Self, UpstreamError> {
        let http = http_client()?;
        Ok(Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            player: Arc::new(Mutex::new(Player::default())),
            content: ContentClient::new(http.clone(), config),
            alquran: AlQuranClient::new(http.clone(), config),
            aladhan: AladhanClient::new(http.clone(), config),
            hadith: HadithClient::new(http, config),
        })
    }

    pub async fn persist(&self, data: &AppData) -> Result<(), AppError> {
        persist_data(&self.data_path, data).await
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by a fresh temp file with every upstream unreachable.
    pub fn offline(tag: &str) -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let data_path =
            std::env::temp_dir().join(format!("werd_{tag}_{}_{nanos}.json", std::process::id()));
        let config = Config::offline(data_path.clone());
        Self::new(&config, data_path, AppData::default()).unwrap()
    }
}
