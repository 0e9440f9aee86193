//! Surah index, reader view and recitation playback.

use crate::alquran::{reader_view, ReaderView, ViewMode, DEFAULT_RECITATION};
use crate::audio::PlayerStatus;
use crate::content::parse_chapter_id;
use crate::errors::AppError;
use crate::models::{Chapter, EditionQuery, ReaderQuery, SequenceRequest, SingleRequest};
use crate::rotation::CHAPTER_COUNT;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

fn surah_id(raw: &str) -> Result<u32, AppError> {
    parse_chapter_id(raw).ok_or_else(|| AppError::bad_request("Invalid or missing surah number"))
}

pub async fn surahs(State(state): State<AppState>) -> Result<Json<Vec<Chapter>>, AppError> {
    {
        let data = state.data.lock().await;
        if !data.chapters.is_empty() {
            return Ok(Json(data.chapters.clone()));
        }
    }

    let chapters = state.alquran.surah_list().await?;
    if !chapters.is_empty() {
        let mut data = state.data.lock().await;
        // Another request may have filled the cache meanwhile.
        if data.chapters.is_empty() {
            data.chapters = chapters.clone();
            state.persist(&data).await?;
            info!("cached {} chapters", chapters.len());
        }
    }
    Ok(Json(chapters))
}

pub async fn surah(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EditionQuery>,
) -> Result<Json<Value>, AppError> {
    let id = surah_id(&id)?;
    Ok(Json(state.alquran.surah(id, query.edition.as_deref()).await?))
}

pub async fn recitations(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.alquran.audio_editions().await?))
}

pub async fn reader(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReaderQuery>,
) -> Result<Json<ReaderView>, AppError> {
    let id = surah_id(&id)?;
    let view = ViewMode::parse(query.view.as_deref())
        .ok_or_else(|| AppError::bad_request("view must be 'cards' or 'mushaf'"))?;
    let recitation = query.recitation.as_deref().unwrap_or(DEFAULT_RECITATION);

    let verses = state.alquran.reader_verses(id, recitation).await?;
    Ok(Json(reader_view(verses, view, query.page.unwrap_or(1))))
}

pub async fn audio_status(State(state): State<AppState>) -> Json<PlayerStatus> {
    Json(state.player.lock().await.status())
}

pub async fn play_sequence(
    State(state): State<AppState>,
    Json(payload): Json<SequenceRequest>,
) -> Result<Json<PlayerStatus>, AppError> {
    if !(1..=CHAPTER_COUNT).contains(&payload.surah) {
        return Err(AppError::bad_request("Invalid or missing surah number"));
    }
    let recitation = payload.recitation.as_deref().unwrap_or(DEFAULT_RECITATION);
    let urls = state.alquran.verse_audio_urls(payload.surah, recitation).await?;
    if urls.is_empty() {
        warn!("no audio for surah {} with {recitation}", payload.surah);
    }

    let mut player = state.player.lock().await;
    player.play_sequence(payload.surah, urls);
    Ok(Json(player.status()))
}

pub async fn play_single(
    State(state): State<AppState>,
    Json(payload): Json<SingleRequest>,
) -> Result<Json<PlayerStatus>, AppError> {
    let url = payload.url.trim();
    if url.is_empty() {
        return Err(AppError::bad_request("url must not be empty"));
    }

    let mut player = state.player.lock().await;
    player.play_single(payload.verse, url.to_string());
    Ok(Json(player.status()))
}

pub async fn audio_ended(State(state): State<AppState>) -> Json<PlayerStatus> {
    let mut player = state.player.lock().await;
    player.ended();
    Json(player.status())
}

pub async fn audio_failed(State(state): State<AppState>) -> Json<PlayerStatus> {
    let mut player = state.player.lock().await;
    warn!("playback failed, stopping");
    player.failed();
    Json(player.status())
}

pub async fn audio_pause(State(state): State<AppState>) -> Json<PlayerStatus> {
    let mut player = state.player.lock().await;
    player.pause();
    Json(player.status())
}

pub async fn audio_resume(State(state): State<AppState>) -> Json<PlayerStatus> {
    let mut player = state.player.lock().await;
    player.resume();
    Json(player.status())
}

pub async fn audio_stop(State(state): State<AppState>) -> Json<PlayerStatus> {
    let mut player = state.player.lock().await;
    player.stop();
    Json(player.status())
}
