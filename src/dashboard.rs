//! Daily cards: verse of the day, hadith batch, prayer times and calendar.

use crate::calendar::{islamic_events, CalendarOverview};
use crate::content::{ContentClient, VerseKey};
use crate::errors::AppError;
use crate::handlers::today;
use crate::hadith::{page_for, DailyHadiths};
use crate::models::{Chapter, DailyVerseResponse, LocationRequest, PrayerTimesResponse, RefreshQuery};
use crate::prayer::{next_obligatory, schedule, split_location, PrayerTimes};
use crate::rotation::{rotate, UnitSizes};
use crate::state::AppState;
use crate::upstream::{self, UpstreamError};
use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;
use serde_json::Value;
use tracing::{info, warn};

/// Verse counts from the content API, falling back to the cached chapter
/// list when the API is unreachable.
struct ChapterSizes<'a> {
    content: &'a ContentClient,
    cached: Vec<Chapter>,
}

#[async_trait]
impl<'a> UnitSizes for ChapterSizes<'a> {
    async fn unit_size(&self, chapter_id: u32) -> upstream::Result<u32> {
        match self.content.unit_size(chapter_id).await {
            Ok(size) => Ok(size),
            Err(err) => {
                let cached = self
                    .cached
                    .iter()
                    .find(|chapter| chapter.id == chapter_id)
                    .map(|chapter| chapter.verses_count);
                match cached {
                    Some(size) => {
                        warn!("chapter {chapter_id} size from cache after lookup failed: {err}");
                        Ok(size)
                    }
                    None => Err(err),
                }
            }
        }
    }
}

pub async fn daily_verse(State(state): State<AppState>) -> Result<Json<DailyVerseResponse>, AppError> {
    let today = today();
    let (stored, cached) = {
        let data = state.data.lock().await;
        (data.daily_verse_state.clone(), data.chapters.clone())
    };

    let sizes = ChapterSizes {
        content: &state.content,
        cached,
    };
    let rotation = rotate(&stored, today, &sizes).await.map_err(|err| {
        warn!("daily verse rotation aborted: {err}");
        AppError::from(err)
    })?;

    if rotation.advanced {
        let mut data = state.data.lock().await;
        data.daily_verse_state = rotation.pointer.clone();
        state.persist(&data).await?;
        info!(
            "daily verse moved to {}:{}",
            rotation.pointer.chapter_id, rotation.pointer.verse_number
        );
    }

    let key = VerseKey {
        chapter: rotation.pointer.chapter_id,
        verse: rotation.pointer.verse_number,
    };
    let mut body = state.content.verse_by_key(&key).await?;
    let verse = body
        .get_mut("verse")
        .map(Value::take)
        .ok_or_else(|| AppError::upstream("No verse data found in the API response."))?;

    Ok(Json(DailyVerseResponse {
        pointer: rotation.pointer,
        advanced: rotation.advanced,
        verse,
    }))
}

pub async fn daily_hadiths(State(state): State<AppState>) -> Result<Json<DailyHadiths>, AppError> {
    let today = today();
    {
        let data = state.data.lock().await;
        if data.daily_hadiths.is_fresh(today) {
            return Ok(Json(data.daily_hadiths.clone()));
        }
    }

    let page = page_for(today);
    let hadiths = state.hadith.page(page).await.map_err(|err| {
        warn!("failed to load hadiths page {page}: {err}");
        AppError::from(err)
    })?;

    let mut data = state.data.lock().await;
    data.daily_hadiths = DailyHadiths {
        hadiths,
        date: today.to_string(),
    };
    state.persist(&data).await?;
    Ok(Json(data.daily_hadiths.clone()))
}

async fn fetch_prayer_times(state: &AppState, location: &str) -> (PrayerTimes, bool) {
    let (city, country) = split_location(location);
    let result = if city.is_empty() {
        Err(UpstreamError::Malformed("location has no city".into()))
    } else {
        state.aladhan.timings_by_city(&city, &country, today()).await
    };

    match result {
        Ok(times) => (times, false),
        Err(err) => {
            warn!("prayer times for '{location}' unavailable, using defaults: {err}");
            (PrayerTimes::fallback(), true)
        }
    }
}

pub async fn prayer_times(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<PrayerTimesResponse>, AppError> {
    let today = today();
    let (cached, location) = {
        let data = state.data.lock().await;
        (data.cached_prayer_times(today), data.user.location.clone())
    };

    let (times, fallback) = match cached {
        Some(cached) if !query.refresh => cached,
        _ => {
            let (times, fallback) = fetch_prayer_times(&state, &location).await;
            let mut data = state.data.lock().await;
            data.cache_prayer_times(times.clone(), fallback, today);
            state.persist(&data).await?;
            (times, fallback)
        }
    };

    Ok(Json(prayer_response(location, times, fallback)))
}

pub async fn update_location(
    State(state): State<AppState>,
    Json(payload): Json<LocationRequest>,
) -> Result<Json<PrayerTimesResponse>, AppError> {
    let location = payload.location.trim().to_string();
    if location.is_empty() {
        return Err(AppError::bad_request("location must not be empty"));
    }

    let (times, fallback) = fetch_prayer_times(&state, &location).await;
    {
        let mut data = state.data.lock().await;
        data.user.location = location.clone();
        data.cache_prayer_times(times.clone(), fallback, today());
        state.persist(&data).await?;
    }

    Ok(Json(prayer_response(location, times, fallback)))
}

fn prayer_response(location: String, times: PrayerTimes, fallback: bool) -> PrayerTimesResponse {
    let now = Local::now().time();
    PrayerTimesResponse {
        schedule: schedule(&times, now),
        next: next_obligatory(&times, now),
        location,
        times,
        fallback,
    }
}

pub async fn calendar(State(state): State<AppState>) -> Json<CalendarOverview> {
    let today = today();

    let hijri = match state.aladhan.to_hijri(today).await {
        Ok(hijri) => Some(hijri),
        Err(err) => {
            warn!("hijri conversion failed, showing default date: {err}");
            None
        }
    };

    let events = match &hijri {
        Some(hijri) => match state.aladhan.hijri_calendar(1, &hijri.year).await {
            Ok(days) => islamic_events(&days),
            Err(err) => {
                warn!("hijri holidays for {} unavailable: {err}", hijri.year);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    Json(CalendarOverview::new(today, hijri, events))
}
