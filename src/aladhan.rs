//! Aladhan lookups: prayer timings by city and Hijri calendar conversion.

use crate::calendar::{CalendarDay, HijriDate};
use crate::config::Config;
use crate::prayer::PrayerTimes;
use crate::upstream::{read_json, Result, UpstreamError};
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde_json::Value;

/// Holidays and conversions are computed for Mecca.
const MECCA_LATITUDE: f64 = 21.4225;
const MECCA_LONGITUDE: f64 = 39.8262;

#[derive(Clone)]
pub struct AladhanClient {
    http: Client,
    base_url: String,
}

impl AladhanClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.aladhan_base_url.clone(),
        }
    }

    pub async fn timings_by_city(&self, city: &str, country: &str, date: NaiveDate) -> Result<PrayerTimes> {
        let data = self
            .data(
                &format!("timingsByCity/{}", date.format("%d-%m-%Y")),
                &[("city", city.to_string()), ("country", country.to_string())],
            )
            .await?;
        let timings = data
            .get("timings")
            .cloned()
            .ok_or_else(|| UpstreamError::Malformed("missing timings".into()))?;
        serde_json::from_value(timings).map_err(|err| UpstreamError::Malformed(err.to_string()))
    }

    /// Gregorian to Hijri conversion for `date`.
    pub async fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate> {
        let data = self
            .data(
                &format!("gToH/{}-{}-{}", date.day(), date.month(), date.year()),
                &mecca(),
            )
            .await?;
        let hijri = data
            .get("hijri")
            .cloned()
            .ok_or_else(|| UpstreamError::Malformed("missing hijri date".into()))?;
        serde_json::from_value(hijri).map_err(|err| UpstreamError::Malformed(err.to_string()))
    }

    /// Days of the given Hijri month.
    pub async fn hijri_calendar(&self, month: u32, year: &str) -> Result<Vec<CalendarDay>> {
        let data = self
            .data(&format!("hijriCalendar/{month}/{year}"), &mecca())
            .await?;
        serde_json::from_value(data).map_err(|err| UpstreamError::Malformed(err.to_string()))
    }

    async fn data(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .query(query)
            .send()
            .await?;
        let mut body = read_json(response).await?;
        body.get_mut("data")
            .map(Value::take)
            .ok_or_else(|| UpstreamError::Malformed("missing data".into()))
    }
}

fn mecca() -> [(&'static str, String); 2] {
    [
        ("latitude", MECCA_LATITUDE.to_string()),
        ("longitude", MECCA_LONGITUDE.to_string()),
    ]
}
