use crate::azkar::{self, Azkar, AzkarCategory, CategoryProgress, ZikrItem};
use crate::errors::AppError;
use crate::misbaha::{common_zikr, CommonZikr, Session};
use crate::models::{
    AppData, Bookmark, HeaderRequest, MisbahaResponse, ProfileRequest, ZikrRequest,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = today();
    let data = state.data.lock().await;
    Html(render_index(date, &data))
}

pub async fn get_state(State(state): State<AppState>) -> Json<AppData> {
    let data = state.data.lock().await;
    Json(data.clone())
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<crate::models::User>, AppError> {
    let name = payload.name.map(|name| name.trim().to_string());
    let location = payload.location.map(|location| location.trim().to_string());
    if name.as_deref().is_some_and(str::is_empty) {
        return Err(AppError::bad_request("name must not be empty"));
    }
    if location.as_deref().is_some_and(str::is_empty) {
        return Err(AppError::bad_request("location must not be empty"));
    }

    let mut data = state.data.lock().await;
    if let Some(name) = name {
        data.user.name = name;
    }
    if let Some(location) = location {
        if location != data.user.location {
            data.user.location = location;
            data.clear_prayer_times();
        }
    }

    state.persist(&data).await?;
    Ok(Json(data.user.clone()))
}

pub async fn update_header(
    State(state): State<AppState>,
    Json(payload): Json<HeaderRequest>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    data.header_arabic_title = payload.arabic;
    data.header_english_title = payload.english;
    state.persist(&data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Json<Vec<Bookmark>> {
    let data = state.data.lock().await;
    Json(data.bookmarks.clone())
}

pub async fn add_bookmark(
    State(state): State<AppState>,
    Json(bookmark): Json<Bookmark>,
) -> Result<(StatusCode, Json<Bookmark>), AppError> {
    if bookmark.id.trim().is_empty() || bookmark.title.trim().is_empty() {
        return Err(AppError::bad_request("bookmark id and title are required"));
    }

    let mut data = state.data.lock().await;
    data.upsert_bookmark(bookmark.clone());
    state.persist(&data).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

pub async fn remove_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    if !data.remove_bookmark(&id) {
        return Err(AppError::not_found(format!("no bookmark '{id}'")));
    }
    state.persist(&data).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct AzkarResponse {
    pub azkar: Azkar,
    pub progress: Vec<CategoryProgress>,
    pub last_reset_date: String,
}

/// Runs the once-a-day reset. Returns whether anything changed.
fn sweep(data: &mut AppData) -> bool {
    let swept = azkar::sweep_if_new_day(&mut data.azkar, &mut data.last_reset_date, today());
    if swept {
        info!("azkar counters reset for {}", data.last_reset_date);
    }
    swept
}

fn azkar_response(data: &AppData) -> AzkarResponse {
    AzkarResponse {
        progress: azkar::progress(&data.azkar),
        azkar: data.azkar.clone(),
        last_reset_date: data.last_reset_date.clone(),
    }
}

pub async fn get_azkar(State(state): State<AppState>) -> Result<Json<AzkarResponse>, AppError> {
    let mut data = state.data.lock().await;
    if sweep(&mut data) {
        state.persist(&data).await?;
    }
    Ok(Json(azkar_response(&data)))
}

pub async fn increment_zikr(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<ZikrItem>, AppError> {
    let category: AzkarCategory = category.parse()?;
    let mut data = state.data.lock().await;
    sweep(&mut data);
    let item = azkar::increment(&mut data.azkar, category, &id)?;
    state.persist(&data).await?;
    Ok(Json(item))
}

pub async fn reset_zikr(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<ZikrItem>, AppError> {
    let category: AzkarCategory = category.parse()?;
    let mut data = state.data.lock().await;
    let item = azkar::reset_item(&mut data.azkar, category, &id)?;
    state.persist(&data).await?;
    Ok(Json(item))
}

pub async fn reset_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<AzkarResponse>, AppError> {
    let category: AzkarCategory = category.parse()?;
    let mut data = state.data.lock().await;
    azkar::reset_category(&mut data.azkar, category);
    state.persist(&data).await?;
    Ok(Json(azkar_response(&data)))
}

pub async fn reset_all_azkar(State(state): State<AppState>) -> Result<Json<AzkarResponse>, AppError> {
    let mut data = state.data.lock().await;
    azkar::reset_all(&mut data.azkar);
    state.persist(&data).await?;
    Ok(Json(azkar_response(&data)))
}

pub async fn get_misbaha(State(state): State<AppState>) -> Json<MisbahaResponse> {
    let data = state.data.lock().await;
    Json(MisbahaResponse::from(&data.misbaha))
}

pub async fn misbaha_phrases() -> Json<&'static [CommonZikr]> {
    Json(common_zikr())
}

pub async fn increment_misbaha(State(state): State<AppState>) -> Result<Json<MisbahaResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.misbaha.increment();
    state.persist(&data).await?;
    Ok(Json(MisbahaResponse::from(&data.misbaha)))
}

pub async fn reset_misbaha(State(state): State<AppState>) -> Result<Json<MisbahaResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.misbaha.reset();
    state.persist(&data).await?;
    Ok(Json(MisbahaResponse::from(&data.misbaha)))
}

pub async fn set_misbaha_zikr(
    State(state): State<AppState>,
    Json(payload): Json<ZikrRequest>,
) -> Result<Json<MisbahaResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.misbaha.set_zikr(&payload.zikr)?;
    state.persist(&data).await?;
    Ok(Json(MisbahaResponse::from(&data.misbaha)))
}

pub async fn save_misbaha_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let mut data = state.data.lock().await;
    let session = data.misbaha.save_session(Utc::now())?;
    state.persist(&data).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn clear_misbaha_sessions(
    State(state): State<AppState>,
) -> Result<Json<MisbahaResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.misbaha.clear_sessions();
    state.persist(&data).await?;
    Ok(Json(MisbahaResponse::from(&data.misbaha)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejected_profile_update_changes_nothing() {
        let state = AppState::offline("profile");
        let before = state.data.lock().await.user.clone();

        let err = update_profile(
            State(state.clone()),
            Json(ProfileRequest {
                name: Some("Changed".into()),
                location: Some("   ".into()),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(state.data.lock().await.user, before);
    }

    #[tokio::test]
    async fn location_change_drops_cached_timings() {
        let state = AppState::offline("profile_location");
        state.data.lock().await.cache_prayer_times(
            crate::prayer::PrayerTimes::fallback(),
            true,
            today(),
        );

        let Json(user) = update_profile(
            State(state.clone()),
            Json(ProfileRequest {
                name: Some("  Amina ".into()),
                location: Some("Rabat, Morocco".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(user.name, "Amina");
        assert_eq!(user.location, "Rabat, Morocco");
        assert!(state.data.lock().await.prayer_times.is_none());
        let _ = std::fs::remove_file(&state.data_path);
    }
}
