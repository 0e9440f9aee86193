//! Direct calls to AlQuran.cloud for surah text, translations and per-verse
//! recitation audio.

use crate::config::Config;
use crate::models::Chapter;
use crate::upstream::{read_json, Result, UpstreamError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ARABIC_EDITION: &str = "ar.uthmani";
pub const TRANSLATION_EDITION: &str = "en.sahih";
pub const DEFAULT_RECITATION: &str = "ar.alafasy";
pub const VERSES_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurahSummary {
    number: u32,
    name: String,
    english_name: String,
    #[serde(default)]
    english_name_translation: String,
    number_of_ayahs: u32,
    #[serde(default)]
    revelation_type: String,
}

impl From<SurahSummary> for Chapter {
    fn from(surah: SurahSummary) -> Self {
        Chapter {
            id: surah.number,
            name_simple: surah.english_name,
            name_arabic: surah.name,
            verses_count: surah.number_of_ayahs,
            revelation_place: match surah.revelation_type.as_str() {
                "Meccan" => "makkah".to_string(),
                "Medinan" => "madinah".to_string(),
                other => other.to_lowercase(),
            },
            translated_name: Some(crate::models::TranslatedName {
                language_name: "english".to_string(),
                name: surah.english_name_translation,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    pub number: u32,
    #[serde(default)]
    pub text: String,
    pub number_in_surah: u32,
    #[serde(default)]
    pub juz: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderVerse {
    pub number: u32,
    pub number_in_surah: u32,
    pub text: String,
    pub translation: String,
    pub audio_url: String,
    pub juz: u32,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Cards,
    Mushaf,
}

impl ViewMode {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.unwrap_or("cards") {
            "cards" => Some(ViewMode::Cards),
            "mushaf" => Some(ViewMode::Mushaf),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReaderPage {
    pub number: usize,
    pub verses: Vec<ReaderVerse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderView {
    pub view: ViewMode,
    pub total_pages: usize,
    pub page: Option<ReaderPage>,
    pub verses: Vec<ReaderVerse>,
}

/// Cards show the whole surah; the mushaf view shows one page of it.
pub fn reader_view(verses: Vec<ReaderVerse>, view: ViewMode, page: usize) -> ReaderView {
    let pages = paginate(&verses, VERSES_PER_PAGE);
    let total_pages = pages.len();
    match view {
        ViewMode::Cards => ReaderView {
            view,
            total_pages,
            page: None,
            verses,
        },
        ViewMode::Mushaf => {
            let index = page.clamp(1, total_pages.max(1)) - 1;
            ReaderView {
                view,
                total_pages,
                page: pages.into_iter().nth(index),
                verses: Vec::new(),
            }
        }
    }
}

pub fn paginate(verses: &[ReaderVerse], per_page: usize) -> Vec<ReaderPage> {
    verses
        .chunks(per_page.max(1))
        .enumerate()
        .map(|(index, chunk)| ReaderPage {
            number: index + 1,
            verses: chunk.to_vec(),
        })
        .collect()
}

/// Lines the three editions up verse by verse. Missing translation or audio
/// entries become empty strings.
pub fn merge_editions(arabic: Vec<Ayah>, translation: &[Ayah], audio: &[Ayah]) -> Vec<ReaderVerse> {
    arabic
        .into_iter()
        .enumerate()
        .map(|(index, ayah)| ReaderVerse {
            number: ayah.number,
            number_in_surah: ayah.number_in_surah,
            text: ayah.text,
            translation: translation
                .get(index)
                .map(|t| t.text.clone())
                .unwrap_or_default(),
            audio_url: audio
                .get(index)
                .and_then(|a| a.audio.clone())
                .unwrap_or_default(),
            juz: ayah.juz,
            page: ayah.page,
        })
        .collect()
}

#[derive(Clone)]
pub struct AlQuranClient {
    http: Client,
    base_url: String,
}

impl AlQuranClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.alquran_base_url.clone(),
        }
    }

    pub async fn surah_list(&self) -> Result<Vec<Chapter>> {
        let data = self.data("surah").await?;
        let surahs: Vec<SurahSummary> =
            serde_json::from_value(data).map_err(|err| UpstreamError::Malformed(err.to_string()))?;
        Ok(surahs.into_iter().map(Chapter::from).collect())
    }

    pub async fn surah(&self, id: u32, edition: Option<&str>) -> Result<Value> {
        match edition {
            Some(edition) => self.data(&format!("surah/{id}/{edition}")).await,
            None => self.data(&format!("surah/{id}")).await,
        }
    }

    pub async fn audio_editions(&self) -> Result<Value> {
        self.data("edition?format=audio").await
    }

    pub async fn ayahs(&self, id: u32, edition: &str) -> Result<Vec<Ayah>> {
        let data = self.surah(id, Some(edition)).await?;
        let ayahs = data.get("ayahs").cloned().unwrap_or(Value::Array(Vec::new()));
        serde_json::from_value(ayahs).map_err(|err| UpstreamError::Malformed(err.to_string()))
    }

    pub async fn verse_audio_urls(&self, id: u32, recitation: &str) -> Result<Vec<String>> {
        let ayahs = self.ayahs(id, recitation).await?;
        Ok(ayahs.into_iter().filter_map(|ayah| ayah.audio).collect())
    }

    pub async fn reader_verses(&self, id: u32, recitation: &str) -> Result<Vec<ReaderVerse>> {
        let (arabic, translation, audio) = tokio::try_join!(
            self.ayahs(id, ARABIC_EDITION),
            self.ayahs(id, TRANSLATION_EDITION),
            self.ayahs(id, recitation),
        )?;
        Ok(merge_editions(arabic, &translation, &audio))
    }

    async fn data(&self, path: &str) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .send()
            .await?;
        let mut body = read_json(response).await?;
        Ok(body.get_mut("data").map(Value::take).unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ayah(number: u32, text: &str, audio: Option<&str>) -> Ayah {
        Ayah {
            number,
            text: text.to_string(),
            number_in_surah: number,
            juz: 1,
            page: 1,
            audio: audio.map(str::to_string),
        }
    }

    fn verses(count: u32) -> Vec<ReaderVerse> {
        let arabic = (1..=count).map(|n| ayah(n, "نص", None)).collect();
        merge_editions(arabic, &[], &[])
    }

    #[test]
    fn merge_lines_up_editions_by_position() {
        let arabic = vec![ayah(1, "بِسْمِ", None), ayah(2, "الْحَمْدُ", None)];
        let translation = vec![ayah(1, "In the name", None)];
        let audio = vec![ayah(1, "", Some("a1.mp3")), ayah(2, "", Some("a2.mp3"))];

        let merged = merge_editions(arabic, &translation, &audio);
        assert_eq!(merged[0].translation, "In the name");
        assert_eq!(merged[1].translation, "");
        assert_eq!(merged[1].audio_url, "a2.mp3");
    }

    #[test]
    fn mushaf_view_pages_by_ten() {
        let view = reader_view(verses(23), ViewMode::Mushaf, 3);
        assert_eq!(view.total_pages, 3);
        let page = view.page.unwrap();
        assert_eq!(page.number, 3);
        assert_eq!(page.verses.len(), 3);
        assert!(view.verses.is_empty());
    }

    #[test]
    fn mushaf_page_is_clamped() {
        let view = reader_view(verses(7), ViewMode::Mushaf, 9);
        assert_eq!(view.page.unwrap().number, 1);
    }

    #[test]
    fn cards_view_returns_every_verse() {
        let view = reader_view(verses(12), ViewMode::Cards, 1);
        assert_eq!(view.verses.len(), 12);
        assert!(view.page.is_none());
        assert_eq!(ViewMode::parse(Some("grid")), None);
        assert_eq!(ViewMode::parse(None), Some(ViewMode::Cards));
    }

    #[test]
    fn surah_summary_becomes_chapter() {
        let summary: SurahSummary = serde_json::from_value(serde_json::json!({
            "number": 1,
            "name": "سُورَةُ ٱلْفَاتِحَةِ",
            "englishName": "Al-Faatiha",
            "englishNameTranslation": "The Opening",
            "numberOfAyahs": 7,
            "revelationType": "Meccan"
        }))
        .unwrap();
        let chapter = Chapter::from(summary);
        assert_eq!(chapter.verses_count, 7);
        assert_eq!(chapter.revelation_place, "makkah");
    }
}
