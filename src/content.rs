//! Proxy for the Quran Foundation content API.
//!
//! Every call performs a client-credentials exchange and forwards the token
//! as `x-auth-token` / `x-client-id` headers.

use crate::config::Config;
use crate::rotation::UnitSizes;
use crate::token::TokenClient;
use crate::upstream::{read_json, Result, UpstreamError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::error;

pub const DEFAULT_TRANSLATION: &str = "131";
pub const DEFAULT_TAFSIR: &str = "169";
/// Recitation whose per-verse audio file comes back with a single verse.
pub const DEFAULT_VERSE_RECITATION: &str = "7";

const VERSE_FIELDS: &[&str] = &[
    "text_uthmani",
    "text_uthmani_simple",
    "text_imlaei",
    "text_imlaei_simple",
    "text_indopak",
    "text_uthmani_tajweed",
    "image_url",
    "image_width",
    "page_number",
];

const WORD_FIELDS: &[&str] = &["text_uthmani_simple", "code_v1", "line_number"];

#[derive(Clone)]
pub struct ContentClient {
    http: Client,
    base_url: String,
    tokens: TokenClient,
}

impl ContentClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            tokens: TokenClient::new(http.clone(), config),
            http,
            base_url: format!("{}/content/api/v4", config.quran_base_url),
        }
    }

    pub fn tokens(&self) -> &TokenClient {
        &self.tokens
    }

    pub async fn chapters(&self) -> Result<Value> {
        self.get("chapters", &[]).await
    }

    pub async fn chapter(&self, id: u32) -> Result<Value> {
        self.get(&format!("chapters/{id}"), &[]).await
    }

    pub async fn verses_by_chapter(
        &self,
        id: u32,
        caller_query: &BTreeMap<String, String>,
    ) -> Result<Value> {
        let query = verse_query(caller_query);
        self.get(&format!("verses/by_chapter/{id}"), &query).await
    }

    pub async fn verse_by_key(&self, key: &VerseKey) -> Result<Value> {
        self.get(&format!("verses/by_key/{key}"), &verse_key_query()).await
    }

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .header("x-auth-token", &token.access_token)
            .header("x-client-id", &token.client_id)
            .query(query)
            .send()
            .await;

        let result = match response {
            Ok(response) => read_json(response).await,
            Err(err) => Err(err.into()),
        };
        if let Err(err) = &result {
            error!("error fetching {path}: {err}");
        }
        result
    }
}

#[async_trait]
impl UnitSizes for ContentClient {
    async fn unit_size(&self, chapter_id: u32) -> Result<u32> {
        let body = self.chapter(chapter_id).await?;
        verses_count(&body).ok_or_else(|| {
            UpstreamError::Malformed(
                "could not retrieve total number of verses for the chapter".into(),
            )
        })
    }
}

fn verses_count(chapter: &Value) -> Option<u32> {
    chapter
        .pointer("/chapter/verses_count")
        .and_then(Value::as_u64)
        .and_then(|count| u32::try_from(count).ok())
}

/// Default verse parameters with the caller's query merged on top.
pub fn verse_query(caller: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut query: BTreeMap<String, String> = [
        ("language", "en".to_string()),
        ("words", "true".to_string()),
        ("translations", DEFAULT_TRANSLATION.to_string()),
        ("tafsirs", DEFAULT_TAFSIR.to_string()),
        ("fields", VERSE_FIELDS.join(",")),
        ("word_fields", WORD_FIELDS.join(",")),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();

    for (key, value) in caller {
        query.insert(key.clone(), value.clone());
    }
    query.into_iter().collect()
}

/// Single verse lookups also ask for the verse's recitation file.
pub fn verse_key_query() -> Vec<(String, String)> {
    let mut caller = BTreeMap::new();
    caller.insert("audio".to_string(), DEFAULT_VERSE_RECITATION.to_string());
    verse_query(&caller)
}

pub fn parse_chapter_id(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<u32>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseKey {
    pub chapter: u32,
    pub verse: u32,
}

impl VerseKey {
    pub fn parse(raw: &str) -> Option<Self> {
        let (chapter, verse) = raw.split_once(':')?;
        Some(Self {
            chapter: parse_chapter_id(chapter)?,
            verse: parse_chapter_id(verse)?,
        })
    }
}

impl std::fmt::Display for VerseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}
