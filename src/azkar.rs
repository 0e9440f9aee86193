use crate::errors::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AzkarCategory {
    Morning,
    Evening,
    AfterPrayer,
    Sleep,
}

impl AzkarCategory {
    pub const ALL: [AzkarCategory; 4] = [
        AzkarCategory::Morning,
        AzkarCategory::Evening,
        AzkarCategory::AfterPrayer,
        AzkarCategory::Sleep,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AzkarCategory::Morning => "morning",
            AzkarCategory::Evening => "evening",
            AzkarCategory::AfterPrayer => "afterPrayer",
            AzkarCategory::Sleep => "sleep",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AzkarCategory::Morning => "Morning",
            AzkarCategory::Evening => "Evening",
            AzkarCategory::AfterPrayer => "After Prayer",
            AzkarCategory::Sleep => "Before Sleep",
        }
    }

    pub fn arabic(self) -> &'static str {
        match self {
            AzkarCategory::Morning => "الصباح",
            AzkarCategory::Evening => "المساء",
            AzkarCategory::AfterPrayer => "بعد الصلاة",
            AzkarCategory::Sleep => "قبل النوم",
        }
    }
}

impl FromStr for AzkarCategory {
    type Err = AzkarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AzkarCategory::ALL
            .into_iter()
            .find(|category| category.key() == value)
            .ok_or_else(|| AzkarError::UnknownCategory(value.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AzkarError {
    #[error("unknown azkar category '{0}'")]
    UnknownCategory(String),

    #[error("unknown zikr '{0}'")]
    UnknownItem(String),
}

impl From<AzkarError> for AppError {
    fn from(err: AzkarError) -> Self {
        match err {
            AzkarError::UnknownCategory(_) => AppError::bad_request(err.to_string()),
            AzkarError::UnknownItem(_) => AppError::not_found(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZikrItem {
    pub id: String,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    pub reference: String,
    pub count: u32,
    pub current_count: u32,
}

impl ZikrItem {
    pub fn is_complete(&self) -> bool {
        self.current_count >= self.count
    }
}

pub type Azkar = BTreeMap<AzkarCategory, Vec<ZikrItem>>;

pub fn default_azkar() -> Azkar {
    AzkarCategory::ALL
        .into_iter()
        .map(|category| (category, seed_items(category)))
        .collect()
}

fn items_mut(azkar: &mut Azkar, category: AzkarCategory) -> &mut Vec<ZikrItem> {
    azkar
        .entry(category)
        .or_insert_with(|| seed_items(category))
}

/// Counts one recitation. At the target count this is a no-op.
pub fn increment(azkar: &mut Azkar, category: AzkarCategory, id: &str) -> Result<ZikrItem, AzkarError> {
    let item = items_mut(azkar, category)
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| AzkarError::UnknownItem(id.to_string()))?;

    if item.current_count < item.count {
        item.current_count += 1;
    }
    Ok(item.clone())
}

pub fn reset_item(azkar: &mut Azkar, category: AzkarCategory, id: &str) -> Result<ZikrItem, AzkarError> {
    let item = items_mut(azkar, category)
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| AzkarError::UnknownItem(id.to_string()))?;

    item.current_count = 0;
    Ok(item.clone())
}

pub fn reset_category(azkar: &mut Azkar, category: AzkarCategory) {
    for item in items_mut(azkar, category) {
        item.current_count = 0;
    }
}

pub fn reset_all(azkar: &mut Azkar) {
    for category in AzkarCategory::ALL {
        reset_category(azkar, category);
    }
}

pub fn category_complete(items: &[ZikrItem]) -> bool {
    items.iter().all(ZikrItem::is_complete)
}

/// Clears every counter the first time it runs on a new calendar date.
pub fn sweep_if_new_day(azkar: &mut Azkar, last_reset_date: &mut String, today: NaiveDate) -> bool {
    let today = today.to_string();
    if *last_reset_date == today {
        return false;
    }
    reset_all(azkar);
    *last_reset_date = today;
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub category: AzkarCategory,
    pub label: String,
    pub arabic: String,
    pub completed: usize,
    pub total: usize,
    pub complete: bool,
}

pub fn progress(azkar: &Azkar) -> Vec<CategoryProgress> {
    AzkarCategory::ALL
        .into_iter()
        .map(|category| {
            let items = azkar.get(&category).map(Vec::as_slice).unwrap_or_default();
            CategoryProgress {
                category,
                label: category.label().to_string(),
                arabic: category.arabic().to_string(),
                completed: items.iter().filter(|item| item.is_complete()).count(),
                total: items.len(),
                complete: category_complete(items),
            }
        })
        .collect()
}

struct Seed {
    id: &'static str,
    arabic: &'static str,
    transliteration: &'static str,
    translation: &'static str,
    reference: &'static str,
    count: u32,
}

fn seed_items(category: AzkarCategory) -> Vec<ZikrItem> {
    let seeds = match category {
        AzkarCategory::Morning => MORNING,
        AzkarCategory::Evening => EVENING,
        AzkarCategory::AfterPrayer => AFTER_PRAYER,
        AzkarCategory::Sleep => SLEEP,
    };
    seeds
        .iter()
        .map(|seed| ZikrItem {
            id: seed.id.to_string(),
            arabic: seed.arabic.to_string(),
            transliteration: seed.transliteration.to_string(),
            translation: seed.translation.to_string(),
            reference: seed.reference.to_string(),
            count: seed.count,
            current_count: 0,
        })
        .collect()
}

const MORNING: &[Seed] = &[
    Seed {
        id: "morning-1",
        arabic: "أَعُوذُ بِاللَّهِ مِنَ الشَّيْطَانِ الرَّجِيمِ",
        transliteration: "A'udhu billahi min ash-shaytani'r-rajim",
        translation: "I seek refuge in Allah from Satan, the accursed.",
        reference: "Quran 16:98",
        count: 1,
    },
    Seed {
        id: "morning-2",
        arabic: "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
        transliteration: "Bismillahi'r-rahmani'r-rahim",
        translation: "In the name of Allah, the Most Gracious, the Most Merciful.",
        reference: "Quran 1:1",
        count: 1,
    },
    Seed {
        id: "morning-3",
        arabic: "سُبْحَانَ اللَّهِ وَبِحَمْدِهِ",
        transliteration: "Subhan Allahi wa bihamdihi",
        translation: "Glory be to Allah and praise Him.",
        reference: "Sahih Muslim 2694",
        count: 100,
    },
    Seed {
        id: "morning-4",
        arabic: "اللَّهُمَّ بِكَ أَصْبَحْنَا وَبِكَ أَمْسَيْنَا وَبِكَ نَحْيَا وَبِكَ نَمُوتُ وَإِلَيْكَ النُّشُورُ",
        transliteration: "Allahumma bika asbahna, wabika amsayna, wabika nahya, wabika namutu, wa ilayka'n-nushur",
        translation: "O Allah, by You we enter the morning, by You we enter the evening, by You we live, by You we die, and to You is the resurrection.",
        reference: "Sunan Abi Dawud 5068",
        count: 1,
    },
    Seed {
        id: "morning-5",
        arabic: "اللَّهُمَّ عَافِنِي فِي بَدَنِي، اللَّهُمَّ عَافِنِي فِي سَمْعِي، اللَّهُمَّ عَافِنِي فِي بَصَرِي، لَا إِلَٰهَ إِلَّا أَنْتَ",
        transliteration: "Allahumma 'afini fi badani, Allahumma 'afini fi sam'i, Allahumma 'afini fi basari, la ilaha illa ant",
        translation: "O Allah, grant health to my body, grant health to my hearing, grant health to my sight. There is no deity except You.",
        reference: "Sunan Abi Dawud 5090",
        count: 3,
    },
];

const EVENING: &[Seed] = &[
    Seed {
        id: "evening-1",
        arabic: "أَمْسَيْنَا وَأَمْسَى الْمُلْكُ لِلَّهِ",
        transliteration: "Amsayna wa amsa'l-mulku lillah",
        translation: "We have reached the evening and at this very time unto Allah belongs all sovereignty.",
        reference: "Sahih Muslim 2723",
        count: 1,
    },
    Seed {
        id: "evening-2",
        arabic: "اللَّهُمَّ أَنْتَ رَبِّي لَا إِلَٰهَ إِلَّا أَنْتَ",
        transliteration: "Allahumma anta rabbi la ilaha illa ant",
        translation: "O Allah, You are my Lord, none has the right to be worshipped except You.",
        reference: "Sahih Bukhari 6306",
        count: 1,
    },
    Seed {
        id: "evening-3",
        arabic: "اللَّهُمَّ إِنِّي أَسْأَلُكَ الْعَافِيَةَ فِي الدُّنْيَا وَالْآخِرَةِ",
        transliteration: "Allahumma inni as'alukal-'afiyata fid-dunya wal-akhirah",
        translation: "O Allah, I ask You for well-being in this world and the Hereafter.",
        reference: "Sunan Ibn Majah 3871",
        count: 1,
    },
    Seed {
        id: "evening-4",
        arabic: "أَعُوذُ بِكَلِمَاتِ اللَّهِ التَّامَّاتِ مِنْ شَرِّ مَا خَلَقَ",
        transliteration: "A'udhu bikalimatillahi't-tammati min sharri ma khalaq",
        translation: "I seek refuge in the perfect words of Allah from the evil of what He has created.",
        reference: "Sahih Muslim 2708",
        count: 3,
    },
];

const AFTER_PRAYER: &[Seed] = &[
    Seed {
        id: "after-1",
        arabic: "سُبْحَانَ اللَّهِ",
        transliteration: "Subhan Allah",
        translation: "Glory be to Allah.",
        reference: "Sahih Muslim 597",
        count: 33,
    },
    Seed {
        id: "after-2",
        arabic: "الْحَمْدُ لِلَّهِ",
        transliteration: "Alhamdulillah",
        translation: "Praise be to Allah.",
        reference: "Sahih Muslim 597",
        count: 33,
    },
    Seed {
        id: "after-3",
        arabic: "اللَّهُ أَكْبَرُ",
        transliteration: "Allahu Akbar",
        translation: "Allah is Greatest.",
        reference: "Sahih Muslim 597",
        count: 34,
    },
    Seed {
        id: "after-4",
        arabic: "لَا إِلَٰهَ إِلَّا ٱللَّهُ وَحْدَهُ لَا شَرِيكَ لَهُ، لَهُ ٱلْمُلْكُ وَلَهُ ٱلْحَمْدُ وَهُوَ عَلَىٰ كُلِّ شَىْءٍ قَدِيرٌ",
        transliteration: "La ilaha illallahu wahdahu la sharika lah, lahul-mulku wa lahul-hamdu wa huwa 'ala kulli shay'in qadir",
        translation: "There is no deity except Allah alone with no partner; to Him belongs the dominion, and to Him belongs all praise, and He is over all things competent.",
        reference: "Sahih Muslim 598",
        count: 1,
    },
    Seed {
        id: "after-5",
        arabic: "اللَّهُمَّ أَجِرْنِي مِنَ النَّارِ",
        transliteration: "Allahumma ajirni min an-nar",
        translation: "O Allah, protect me from the Fire.",
        reference: "Sunan Abi Dawud 5079",
        count: 7,
    },
];

const SLEEP: &[Seed] = &[
    Seed {
        id: "sleep-1",
        arabic: "بِاسْمِكَ اللَّهُمَّ أَمُوتُ وَأَحْيَا",
        transliteration: "Bismika Allahumma amutu wa ahya",
        translation: "In Your name, O Allah, I live and die.",
        reference: "Sahih Bukhari 6324",
        count: 1,
    },
    Seed {
        id: "sleep-2",
        arabic: "أَسْتَغْفِرُ اللَّهَ",
        transliteration: "Astaghfirullah",
        translation: "I seek forgiveness from Allah.",
        reference: "Sahih Muslim 2711",
        count: 3,
    },
    Seed {
        id: "sleep-3",
        arabic: "اللَّهُمَّ رَبَّ السَّمَاوَاتِ السَّبْعِ وَرَبَّ الأَرْضِ وَرَبَّ كُلِّ شَيْءٍ، فَالِقَ الْحَبِّ وَالنَّوَى، مُنْزِلَ التَّوْرَاةِ وَالإِنْجِيلِ وَالْقُرْآنِ، أَعُوذُ بِكَ مِنْ شَرِّ كُلِّ شَيْءٍ أَنْتَ آخِذٌ بِنَاصِيَتِهِ",
        transliteration: "Allahumma Rabbas-samawati's-sab'i wa Rabbal-ardi wa Rabba kulli shay'in, faliqal-habbi wan-nawa, munzilat-Tawrati wal-Injili wal-Qur'an, a'udhu bika min sharri kulli shay'in anta akhidhun binasiyatihi",
        translation: "O Allah, Lord of the seven heavens and Lord of the earth and Lord of all things, Splitter of the grain and the date-stone, Revealer of the Torah, the Gospel, and the Quran, I seek refuge in You from the evil of everything You hold by its forelock.",
        reference: "Sunan Abi Dawud 5067",
        count: 1,
    },
    Seed {
        id: "sleep-4",
        arabic: "اللَّهُمَّ قِنِي عَذَابَكَ يَوْمَ تَبْعَثُ عِبَادَكَ",
        transliteration: "Allahumma qini 'adhabaka yawma tab'athu 'ibadak",
        translation: "O Allah, protect me from Your punishment on the day You resurrect Your servants.",
        reference: "Sunan Tirmidhi 3393",
        count: 3,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_stops_at_target() {
        let mut azkar = default_azkar();
        for _ in 0..33 {
            increment(&mut azkar, AzkarCategory::AfterPrayer, "after-1").unwrap();
        }
        let item = increment(&mut azkar, AzkarCategory::AfterPrayer, "after-1").unwrap();
        assert_eq!(item.current_count, 33);
        assert!(item.is_complete());

        let item = increment(&mut azkar, AzkarCategory::AfterPrayer, "after-1").unwrap();
        assert_eq!(item.current_count, 33);
    }

    #[test]
    fn increment_never_exceeds_any_target() {
        let mut azkar = default_azkar();
        for category in AzkarCategory::ALL {
            let ids: Vec<String> = azkar[&category].iter().map(|item| item.id.clone()).collect();
            for id in ids {
                for _ in 0..120 {
                    increment(&mut azkar, category, &id).unwrap();
                }
            }
        }
        for items in azkar.values() {
            assert!(items.iter().all(|item| item.current_count == item.count));
        }
    }

    #[test]
    fn category_complete_only_when_every_item_is_done() {
        let mut azkar = default_azkar();
        for _ in 0..100 {
            increment(&mut azkar, AzkarCategory::Morning, "morning-3").unwrap();
        }
        assert!(!category_complete(&azkar[&AzkarCategory::Morning]));

        for id in ["morning-1", "morning-2", "morning-4"] {
            increment(&mut azkar, AzkarCategory::Morning, id).unwrap();
        }
        for _ in 0..3 {
            increment(&mut azkar, AzkarCategory::Morning, "morning-5").unwrap();
        }
        assert!(category_complete(&azkar[&AzkarCategory::Morning]));
    }

    #[test]
    fn reset_category_zeroes_counts_and_keeps_text() {
        let mut azkar = default_azkar();
        increment(&mut azkar, AzkarCategory::Sleep, "sleep-2").unwrap();
        increment(&mut azkar, AzkarCategory::Sleep, "sleep-4").unwrap();
        increment(&mut azkar, AzkarCategory::Evening, "evening-4").unwrap();
        let before = azkar[&AzkarCategory::Sleep].clone();

        reset_category(&mut azkar, AzkarCategory::Sleep);

        let after = &azkar[&AzkarCategory::Sleep];
        for (old, new) in before.iter().zip(after) {
            assert_eq!(new.current_count, 0);
            assert_eq!(new.count, old.count);
            assert_eq!(new.arabic, old.arabic);
            assert_eq!(new.translation, old.translation);
        }
        assert_eq!(azkar[&AzkarCategory::Evening][3].current_count, 1);
    }

    #[test]
    fn reset_item_touches_only_that_item() {
        let mut azkar = default_azkar();
        increment(&mut azkar, AzkarCategory::Morning, "morning-3").unwrap();
        increment(&mut azkar, AzkarCategory::Morning, "morning-5").unwrap();

        let item = reset_item(&mut azkar, AzkarCategory::Morning, "morning-3").unwrap();
        assert_eq!(item.current_count, 0);
        assert_eq!(azkar[&AzkarCategory::Morning][4].current_count, 1);
    }

    #[test]
    fn unknown_items_and_categories_are_rejected() {
        let mut azkar = default_azkar();
        assert!(matches!(
            increment(&mut azkar, AzkarCategory::Morning, "after-1"),
            Err(AzkarError::UnknownItem(_))
        ));
        assert!("noon".parse::<AzkarCategory>().is_err());
        assert_eq!("afterPrayer".parse::<AzkarCategory>().unwrap(), AzkarCategory::AfterPrayer);
    }

    #[test]
    fn sweep_runs_once_per_date() {
        let mut azkar = default_azkar();
        let mut last = "2024-01-01".to_string();
        increment(&mut azkar, AzkarCategory::Evening, "evening-1").unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(!sweep_if_new_day(&mut azkar, &mut last, today));
        assert_eq!(azkar[&AzkarCategory::Evening][0].current_count, 1);

        let tomorrow = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(sweep_if_new_day(&mut azkar, &mut last, tomorrow));
        assert_eq!(azkar[&AzkarCategory::Evening][0].current_count, 0);
        assert_eq!(last, "2024-01-02");
    }

    #[test]
    fn missing_category_is_seeded_lazily() {
        let mut azkar = Azkar::new();
        let item = increment(&mut azkar, AzkarCategory::Sleep, "sleep-1").unwrap();
        assert_eq!(item.current_count, 1);
        assert_eq!(azkar[&AzkarCategory::Sleep].len(), 4);
    }

    #[test]
    fn progress_reports_every_category() {
        let azkar = default_azkar();
        let summary = progress(&azkar);
        assert_eq!(summary.len(), 4);
        assert_eq!(summary[2].category, AzkarCategory::AfterPrayer);
        assert_eq!(summary[2].total, 5);
        assert_eq!(summary[2].completed, 0);
        assert!(!summary[2].complete);
    }
}
