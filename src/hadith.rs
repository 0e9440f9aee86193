//! Daily hadith batch: one page of the corpus per calendar day.

use crate::config::Config;
use crate::upstream::{read_json, Result, UpstreamError};
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOTAL_HADITHS: u32 = 40465;
pub const PER_PAGE: u32 = 25;
pub const TOTAL_PAGES: u32 = TOTAL_HADITHS.div_ceil(PER_PAGE);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HadithBook {
    #[serde(default)]
    pub book_name: String,
    #[serde(default)]
    pub writer_name: String,
    #[serde(default)]
    pub book_slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hadith {
    pub id: u64,
    #[serde(default)]
    pub hadith_number: String,
    #[serde(default)]
    pub english_narrator: Option<String>,
    #[serde(default)]
    pub hadith_english: Option<String>,
    #[serde(default)]
    pub hadith_arabic: Option<String>,
    #[serde(default)]
    pub heading_english: Option<String>,
    #[serde(default)]
    pub heading_arabic: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub book: Option<HadithBook>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHadiths {
    pub hadiths: Vec<Hadith>,
    pub date: String,
}

impl DailyHadiths {
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.date == today.to_string() && !self.hadiths.is_empty()
    }
}

/// Page of the corpus shown on `date`. Stable for a given day and spread
/// across the whole corpus from one day to the next.
pub fn page_for(date: NaiveDate) -> u32 {
    let day = date.num_days_from_ce().unsigned_abs() as u64;
    (day * 7919 % TOTAL_PAGES as u64) as u32 + 1
}

#[derive(Clone)]
pub struct HadithClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HadithClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.hadith_base_url.clone(),
            api_key: config.hadith_api_key.clone(),
        }
    }

    pub async fn page(&self, page: u32) -> Result<Vec<Hadith>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredentials("HADITH_API_KEY"))?;

        let response = self
            .http
            .get(format!("{}/hadiths", self.base_url))
            .query(&[("page", page.to_string()), ("apiKey", api_key.to_string())])
            .send()
            .await?;
        let body = read_json(response).await?;

        let data = body
            .pointer("/hadiths/data")
            .cloned()
            .unwrap_or(Value::Array(Vec::new()));
        let hadiths: Vec<Hadith> = serde_json::from_value(data)
            .map_err(|err| UpstreamError::Malformed(err.to_string()))?;

        if hadiths.is_empty() {
            return Err(UpstreamError::Malformed("no hadiths found".into()));
        }
        Ok(hadiths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn page_is_in_range_and_stable_per_day() {
        let today = date(2025, 3, 14);
        let page = page_for(today);
        assert!((1..=TOTAL_PAGES).contains(&page));
        assert_eq!(page, page_for(today));
        assert_ne!(page, page_for(date(2025, 3, 15)));
        assert_eq!(TOTAL_PAGES, 1619);
    }

    #[test]
    fn cache_is_fresh_only_for_today_with_content() {
        let today = date(2025, 3, 14);
        let hadith: Hadith = serde_json::from_value(serde_json::json!({
            "id": 7,
            "hadithNumber": "1",
            "hadithEnglish": "Actions are by intentions.",
            "book": { "bookName": "Sahih Bukhari" }
        }))
        .unwrap();

        let mut cache = DailyHadiths {
            hadiths: Vec::new(),
            date: today.to_string(),
        };
        assert!(!cache.is_fresh(today));

        cache.hadiths.push(hadith);
        assert!(cache.is_fresh(today));
        assert!(!cache.is_fresh(date(2025, 3, 15)));
    }
}
