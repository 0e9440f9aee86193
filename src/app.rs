use crate::state::AppState;
use crate::{dashboard, handlers, proxy, reader};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/profile", put(handlers::update_profile))
        .route("/api/header", put(handlers::update_header))
        .route(
            "/api/bookmarks",
            get(handlers::list_bookmarks).post(handlers::add_bookmark),
        )
        .route("/api/bookmarks/:id", delete(handlers::remove_bookmark))
        .route("/api/azkar", get(handlers::get_azkar))
        .route("/api/azkar/reset", post(handlers::reset_all_azkar))
        .route("/api/azkar/:category/reset", post(handlers::reset_category))
        .route(
            "/api/azkar/:category/items/:id/increment",
            post(handlers::increment_zikr),
        )
        .route(
            "/api/azkar/:category/items/:id/reset",
            post(handlers::reset_zikr),
        )
        .route("/api/misbaha", get(handlers::get_misbaha))
        .route("/api/misbaha/phrases", get(handlers::misbaha_phrases))
        .route("/api/misbaha/increment", post(handlers::increment_misbaha))
        .route("/api/misbaha/reset", post(handlers::reset_misbaha))
        .route("/api/misbaha/zikr", put(handlers::set_misbaha_zikr))
        .route(
            "/api/misbaha/sessions",
            post(handlers::save_misbaha_session).delete(handlers::clear_misbaha_sessions),
        )
        .route("/api/quran/token", get(proxy::token))
        .route("/api/quran/chapters", get(proxy::chapters))
        .route("/api/quran/chapters/:id", get(proxy::chapter))
        .route("/api/quran/verses/by_chapter/:id", get(proxy::verses_by_chapter))
        .route("/api/quran/verses/by_key/:key", get(proxy::verse_by_key))
        .route("/api/daily-verse", get(dashboard::daily_verse))
        .route("/api/hadiths/daily", get(dashboard::daily_hadiths))
        .route("/api/prayer-times", get(dashboard::prayer_times))
        .route("/api/location", put(dashboard::update_location))
        .route("/api/calendar", get(dashboard::calendar))
        .route("/api/surahs", get(reader::surahs))
        .route("/api/surahs/:id", get(reader::surah))
        .route("/api/surahs/:id/reader", get(reader::reader))
        .route("/api/recitations", get(reader::recitations))
        .route("/api/audio", get(reader::audio_status))
        .route("/api/audio/sequence", post(reader::play_sequence))
        .route("/api/audio/single", post(reader::play_single))
        .route("/api/audio/ended", post(reader::audio_ended))
        .route("/api/audio/failed", post(reader::audio_failed))
        .route("/api/audio/pause", post(reader::audio_pause))
        .route("/api/audio/resume", post(reader::audio_resume))
        .route("/api/audio/stop", post(reader::audio_stop))
        .with_state(state)
}
