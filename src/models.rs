use crate::azkar::{default_azkar, Azkar};
use crate::hadith::DailyHadiths;
use crate::misbaha::Misbaha;
use crate::prayer::{NextPrayer, PrayerTimes, Schedule};
use crate::rotation::DailyPointer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub location: String,
}

impl Default for User {
    fn default() -> Self {
        Self {
            name: "أخي الكريم".to_string(),
            location: "Cairo, Egypt".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedName {
    pub language_name: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    pub name_simple: String,
    pub name_arabic: String,
    pub verses_count: u32,
    #[serde(default)]
    pub revelation_place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_name: Option<TranslatedName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    Quran,
    Hadith,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BookmarkKind,
    pub title: String,
    pub content: String,
}

/// Everything that survives a restart. Written as one record after each
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    pub user: User,
    pub header_arabic_title: String,
    pub header_english_title: String,
    pub chapters: Vec<Chapter>,
    pub bookmarks: Vec<Bookmark>,
    pub azkar: Azkar,
    pub last_reset_date: String,
    pub misbaha: Misbaha,
    pub daily_verse_state: DailyPointer,
    pub daily_hadiths: DailyHadiths,
    pub prayer_times: Option<PrayerTimes>,
    /// Whether the cached timings are the built-in defaults.
    pub prayer_times_fallback: bool,
    pub prayer_times_date: String,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            user: User::default(),
            header_arabic_title: "الرئيسية".to_string(),
            header_english_title: "Dashboard".to_string(),
            chapters: Vec::new(),
            bookmarks: Vec::new(),
            azkar: default_azkar(),
            last_reset_date: String::new(),
            misbaha: Misbaha::default(),
            daily_verse_state: DailyPointer::default(),
            daily_hadiths: DailyHadiths::default(),
            prayer_times: None,
            prayer_times_fallback: false,
            prayer_times_date: String::new(),
        }
    }
}

impl AppData {
    pub fn chapter(&self, id: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }

    /// Saves or replaces a bookmark with the same id.
    pub fn upsert_bookmark(&mut self, bookmark: Bookmark) {
        match self.bookmarks.iter_mut().find(|b| b.id == bookmark.id) {
            Some(existing) => *existing = bookmark,
            None => self.bookmarks.push(bookmark),
        }
    }

    /// Timings cached for `today`, with their fallback flag. Older entries
    /// are treated as missing.
    pub fn cached_prayer_times(&self, today: NaiveDate) -> Option<(PrayerTimes, bool)> {
        let times = self.prayer_times.as_ref()?;
        if self.prayer_times_date != today.to_string() {
            return None;
        }
        Some((times.clone(), self.prayer_times_fallback))
    }

    pub fn cache_prayer_times(&mut self, times: PrayerTimes, fallback: bool, today: NaiveDate) {
        self.prayer_times = Some(times);
        self.prayer_times_fallback = fallback;
        self.prayer_times_date = today.to_string();
    }

    pub fn clear_prayer_times(&mut self) {
        self.prayer_times = None;
        self.prayer_times_fallback = false;
        self.prayer_times_date.clear();
    }

    pub fn remove_bookmark(&mut self, id: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|bookmark| bookmark.id != id);
        self.bookmarks.len() != before
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct HeaderRequest {
    pub arabic: String,
    pub english: String,
}

#[derive(Debug, Deserialize)]
pub struct ZikrRequest {
    pub zikr: String,
}

#[derive(Debug, Deserialize)]
pub struct SequenceRequest {
    pub surah: u32,
    pub recitation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SingleRequest {
    pub verse: u32,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReaderQuery {
    pub view: Option<String>,
    pub page: Option<usize>,
    pub recitation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditionQuery {
    pub edition: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailyVerseResponse {
    pub pointer: DailyPointer,
    pub advanced: bool,
    pub verse: Value,
}

#[derive(Debug, Serialize)]
pub struct PrayerTimesResponse {
    pub location: String,
    pub times: PrayerTimes,
    pub fallback: bool,
    pub schedule: Schedule,
    pub next: NextPrayer,
}

#[derive(Debug, Serialize)]
pub struct MisbahaResponse {
    pub count: u64,
    pub zikr: String,
    pub recent_sessions: Vec<crate::misbaha::Session>,
    pub total_sessions: usize,
}

impl From<&Misbaha> for MisbahaResponse {
    fn from(misbaha: &Misbaha) -> Self {
        Self {
            count: misbaha.count,
            zikr: misbaha.custom_zikr.clone(),
            recent_sessions: misbaha.recent_sessions(5),
            total_sessions: misbaha.sessions.len(),
        }
    }
}
