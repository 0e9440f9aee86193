//! Verse-of-the-day pointer.
//!
//! The pointer moves forward by one verse per distinct calendar date and
//! rolls into the next chapter at the chapter's verse-count boundary.

use crate::upstream::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const CHAPTER_COUNT: u32 = 114;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyPointer {
    pub chapter_id: u32,
    pub verse_number: u32,
    pub last_shown_date: String,
}

impl Default for DailyPointer {
    fn default() -> Self {
        Self {
            chapter_id: 1,
            verse_number: 1,
            last_shown_date: String::new(),
        }
    }
}

impl DailyPointer {
    pub fn is_shown_on(&self, today: NaiveDate) -> bool {
        self.last_shown_date == today.to_string()
    }

    fn normalized(&self) -> (u32, u32) {
        (self.chapter_id.max(1), self.verse_number.max(1))
    }
}

/// Source of unit sizes, i.e. the verse count of a chapter.
#[async_trait]
pub trait UnitSizes: Send + Sync {
    async fn unit_size(&self, unit: u32) -> Result<u32>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub pointer: DailyPointer,
    pub advanced: bool,
}

pub fn advance(pointer: &DailyPointer, unit_size: u32, today: NaiveDate) -> DailyPointer {
    let (chapter_id, verse_number) = pointer.normalized();

    let (chapter_id, verse_number) = if verse_number >= unit_size {
        let next = if chapter_id >= CHAPTER_COUNT { 1 } else { chapter_id + 1 };
        (next, 1)
    } else {
        (chapter_id, verse_number + 1)
    };

    DailyPointer {
        chapter_id,
        verse_number,
        last_shown_date: today.to_string(),
    }
}

/// Same date: the stored pointer is reused without a lookup. New date: the
/// current chapter's size is looked up first and a failed lookup aborts the
/// rotation, leaving the caller's pointer as it was.
pub async fn rotate<S>(pointer: &DailyPointer, today: NaiveDate, sizes: &S) -> Result<Rotation>
where
    S: UnitSizes + ?Sized,
{
    if pointer.is_shown_on(today) {
        let (chapter_id, verse_number) = pointer.normalized();
        return Ok(Rotation {
            pointer: DailyPointer {
                chapter_id,
                verse_number,
                last_shown_date: pointer.last_shown_date.clone(),
            },
            advanced: false,
        });
    }

    let (chapter_id, _) = pointer.normalized();
    let size = sizes.unit_size(chapter_id).await?;

    Ok(Rotation {
        pointer: advance(pointer, size, today),
        advanced: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSizes {
        sizes: HashMap<u32, u32>,
        calls: AtomicUsize,
    }

    impl FakeSizes {
        fn new(sizes: &[(u32, u32)]) -> Self {
            Self {
                sizes: sizes.iter().copied().collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl UnitSizes for FakeSizes {
        async fn unit_size(&self, unit: u32) -> Result<u32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sizes
                .get(&unit)
                .copied()
                .ok_or_else(|| UpstreamError::Status("chapter lookup failed".into()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pointer(chapter_id: u32, verse_number: u32, last: &str) -> DailyPointer {
        DailyPointer {
            chapter_id,
            verse_number,
            last_shown_date: last.to_string(),
        }
    }

    #[test]
    fn advance_wraps_at_chapter_boundary() {
        let next = advance(&pointer(1, 7, "2024-01-01"), 7, date(2024, 1, 2));
        assert_eq!(next, pointer(2, 1, "2024-01-02"));
    }

    #[test]
    fn advance_moves_one_verse_inside_chapter() {
        let next = advance(&pointer(2, 10, "2024-01-01"), 286, date(2024, 1, 5));
        assert_eq!(next, pointer(2, 11, "2024-01-05"));
    }

    #[test]
    fn advance_after_last_chapter_starts_over() {
        let next = advance(&pointer(114, 6, "2024-01-01"), 6, date(2024, 1, 2));
        assert_eq!(next, pointer(1, 1, "2024-01-02"));
    }

    #[test]
    fn advance_treats_unset_fields_as_first_verse() {
        let next = advance(&pointer(0, 0, ""), 7, date(2024, 1, 2));
        assert_eq!(next, pointer(1, 2, "2024-01-02"));
    }

    #[tokio::test]
    async fn rotate_twice_on_same_date_is_stable() {
        let sizes = FakeSizes::new(&[(1, 7), (2, 286)]);
        let today = date(2024, 3, 1);

        let first = rotate(&pointer(1, 3, "2024-02-29"), today, &sizes).await.unwrap();
        assert!(first.advanced);
        assert_eq!(first.pointer, pointer(1, 4, "2024-03-01"));

        let second = rotate(&first.pointer, today, &sizes).await.unwrap();
        assert!(!second.advanced);
        assert_eq!(second.pointer, first.pointer);
        assert_eq!(sizes.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rotate_on_new_date_advances_exactly_once() {
        let sizes = FakeSizes::new(&[(1, 7)]);
        let stored = pointer(1, 7, "2024-01-01");

        let rotation = rotate(&stored, date(2024, 1, 2), &sizes).await.unwrap();
        assert_eq!(rotation.pointer, pointer(2, 1, "2024-01-02"));
    }

    #[tokio::test]
    async fn failed_lookup_aborts_rotation() {
        let sizes = FakeSizes::new(&[]);
        let stored = pointer(5, 3, "2024-01-01");

        let result = rotate(&stored, date(2024, 1, 2), &sizes).await;
        assert!(result.is_err());
        assert_eq!(stored, pointer(5, 3, "2024-01-01"));
    }
}
