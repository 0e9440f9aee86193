use crate::config::Config;
use crate::errors::AppError;
use crate::models::AppData;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

pub const STORAGE_KEY: &str = "werd-storage";
pub const STORAGE_VERSION: u64 = 2;

#[derive(Serialize)]
struct Envelope<'a> {
    name: &'static str,
    state: &'a AppData,
    version: u64,
}

pub fn resolve_data_path(config: &Config) -> PathBuf {
    config.data_path.clone()
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes).and_then(decode) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let envelope = Envelope {
        name: STORAGE_KEY,
        state: data,
        version: STORAGE_VERSION,
    };
    let payload = serde_json::to_vec_pretty(&envelope).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Accepts both the versioned envelope and a bare state document, which is
/// treated as version 0.
pub fn decode(value: Value) -> Result<AppData, serde_json::Error> {
    let (state, version) = match value {
        Value::Object(mut root) if root.contains_key("state") => {
            let version = root.get("version").and_then(Value::as_u64).unwrap_or(0);
            (root.remove("state").unwrap_or(Value::Null), version)
        }
        other => (other, 0),
    };

    if version < STORAGE_VERSION {
        info!("migrating stored state from version {version} to {STORAGE_VERSION}");
    }
    serde_json::from_value(migrate(state, version))
}

/// Version 0 kept the daily verse under `surahId`, version 1 still called the
/// verse index `ayahNumber`.
pub fn migrate(mut state: Value, version: u64) -> Value {
    if version >= STORAGE_VERSION {
        return state;
    }
    let Some(pointer) = state
        .get_mut("dailyVerseState")
        .and_then(Value::as_object_mut)
    else {
        return state;
    };

    if version < 1 {
        rename(pointer, "surahId", "chapterId");
    }
    if version < 2 {
        rename(pointer, "ayahNumber", "verseNumber");
    }
    if !pointer.get("chapterId").is_some_and(Value::is_u64) {
        pointer.insert("chapterId".into(), Value::from(1));
    }
    state
}

fn rename(object: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = object.remove(from) {
        object.entry(to).or_insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("werd_storage_{tag}_{}_{nanos}.json", std::process::id()))
    }

    #[test]
    fn version_zero_pointer_is_renamed() {
        let stored = json!({
            "state": {
                "user": { "name": "Amina", "location": "Rabat, Morocco" },
                "dailyVerseState": { "surahId": 3, "ayahNumber": 9, "lastShownDate": "2024-02-01" }
            },
            "version": 0
        });

        let data = decode(stored).unwrap();
        assert_eq!(data.daily_verse_state.chapter_id, 3);
        assert_eq!(data.daily_verse_state.verse_number, 9);
        assert_eq!(data.daily_verse_state.last_shown_date, "2024-02-01");
        assert_eq!(data.user.name, "Amina");
    }

    #[test]
    fn missing_chapter_id_is_backfilled() {
        let stored = json!({
            "state": { "dailyVerseState": { "ayahNumber": 4, "lastShownDate": "" } },
            "version": 1
        });

        let data = decode(stored).unwrap();
        assert_eq!(data.daily_verse_state.chapter_id, 1);
        assert_eq!(data.daily_verse_state.verse_number, 4);
    }

    #[test]
    fn bare_documents_are_version_zero() {
        let stored = json!({
            "dailyVerseState": { "surahId": 2, "ayahNumber": 255, "lastShownDate": "2024-02-01" },
            "misbaha": { "count": 12, "customZikr": "الله أكبر", "sessions": [] }
        });

        let data = decode(stored).unwrap();
        assert_eq!(data.daily_verse_state.chapter_id, 2);
        assert_eq!(data.daily_verse_state.verse_number, 255);
        assert_eq!(data.misbaha.count, 12);
        assert_eq!(data.azkar.len(), 4);
    }

    #[test]
    fn current_version_is_left_alone() {
        let state = json!({ "dailyVerseState": { "chapterId": 5, "verseNumber": 1, "ayahNumber": 99 } });
        assert_eq!(migrate(state.clone(), STORAGE_VERSION), state);
    }

    #[tokio::test]
    async fn persist_then_load_keeps_state() {
        let path = temp_path("roundtrip");
        let mut data = AppData::default();
        data.misbaha.increment();
        data.daily_verse_state.verse_number = 6;

        persist_data(&path, &data).await.unwrap();
        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], json!(STORAGE_VERSION));
        assert_eq!(raw["name"], json!(STORAGE_KEY));

        let loaded = load_data(&path).await;
        assert_eq!(loaded.misbaha.count, 1);
        assert_eq!(loaded.daily_verse_state.verse_number, 6);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unreadable_file_falls_back_to_defaults() {
        let path = temp_path("garbage");
        std::fs::write(&path, b"{ not json").unwrap();
        let loaded = load_data(&path).await;
        assert_eq!(loaded.misbaha.count, 0);
        let _ = std::fs::remove_file(path);
    }
}
