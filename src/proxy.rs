//! `/api/quran/*`: thin relays to the content API with a fresh token.

use crate::content::{parse_chapter_id, VerseKey};
use crate::errors::AppError;
use crate::state::AppState;
use crate::token::AccessToken;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use std::collections::BTreeMap;

pub async fn token(State(state): State<AppState>) -> Result<Json<AccessToken>, AppError> {
    let token = state.content.tokens().access_token().await?;
    Ok(Json(token))
}

pub async fn chapters(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.content.chapters().await?))
}

pub async fn chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_chapter_id(&id).ok_or_else(|| AppError::bad_request("Invalid or missing chapter id"))?;
    Ok(Json(state.content.chapter(id).await?))
}

pub async fn verses_by_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let id = parse_chapter_id(&id)
        .ok_or_else(|| AppError::bad_request("Invalid or missing chapter number"))?;
    Ok(Json(state.content.verses_by_chapter(id, &query).await?))
}

pub async fn verse_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, AppError> {
    let key = VerseKey::parse(&key)
        .ok_or_else(|| AppError::bad_request("Invalid verse key, expected chapter:verse"))?;
    Ok(Json(state.content.verse_by_key(&key).await?))
}
