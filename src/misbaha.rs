use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZIKR: &str = "سبحان الله";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub zikr: String,
    pub count: u64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Misbaha {
    pub count: u64,
    pub custom_zikr: String,
    pub sessions: Vec<Session>,
}

impl Default for Misbaha {
    fn default() -> Self {
        Self {
            count: 0,
            custom_zikr: DEFAULT_ZIKR.to_string(),
            sessions: Vec::new(),
        }
    }
}

impl Misbaha {
    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn set_zikr(&mut self, zikr: &str) -> Result<(), AppError> {
        let zikr = zikr.trim();
        if zikr.is_empty() {
            return Err(AppError::bad_request("zikr must not be empty"));
        }
        self.custom_zikr = zikr.to_string();
        Ok(())
    }

    /// Archives the running count under the current phrase and starts over.
    pub fn save_session(&mut self, now: DateTime<Utc>) -> Result<Session, AppError> {
        if self.count == 0 {
            return Err(AppError::bad_request("nothing to save, count is zero"));
        }
        let session = Session {
            zikr: self.custom_zikr.clone(),
            count: self.count,
            date: now.to_rfc3339(),
        };
        self.sessions.push(session.clone());
        self.count = 0;
        Ok(session)
    }

    pub fn clear_sessions(&mut self) {
        self.sessions.clear();
    }

    pub fn recent_sessions(&self, limit: usize) -> Vec<Session> {
        self.sessions.iter().rev().take(limit).cloned().collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommonZikr {
    pub arabic: &'static str,
    pub transliteration: &'static str,
    pub translation: &'static str,
}

pub fn common_zikr() -> &'static [CommonZikr] {
    COMMON_ZIKR
}

const COMMON_ZIKR: &[CommonZikr] = &[
    CommonZikr {
        arabic: "سبحان الله",
        transliteration: "Subhan Allah",
        translation: "Glory be to Allah",
    },
    CommonZikr {
        arabic: "الحمد لله",
        transliteration: "Alhamdulillah",
        translation: "Praise be to Allah",
    },
    CommonZikr {
        arabic: "الله أكبر",
        transliteration: "Allahu Akbar",
        translation: "Allah is Greatest",
    },
    CommonZikr {
        arabic: "لا إله إلا الله",
        transliteration: "La ilaha illa Allah",
        translation: "There is no god but Allah",
    },
    CommonZikr {
        arabic: "استغفر الله",
        transliteration: "Astaghfirullah",
        translation: "I seek forgiveness from Allah",
    },
    CommonZikr {
        arabic: "لا حول ولا قوة إلا بالله",
        transliteration: "La hawla wa la quwwata illa billah",
        translation: "There is no power except with Allah",
    },
    CommonZikr {
        arabic: "اللهم صلي على سيدنا محمد",
        transliteration: "Allahum salli ala saidena Muhammad",
        translation: "The blessings of God to the Prophet Muhammad.",
    },
];
