use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimes {
    #[serde(rename = "Fajr")]
    pub fajr: String,
    #[serde(rename = "Sunrise")]
    pub sunrise: String,
    #[serde(rename = "Dhuhr")]
    pub dhuhr: String,
    #[serde(rename = "Asr")]
    pub asr: String,
    #[serde(rename = "Maghrib")]
    pub maghrib: String,
    #[serde(rename = "Isha")]
    pub isha: String,
}

impl PrayerTimes {
    /// Used whenever the timings lookup fails.
    pub fn fallback() -> Self {
        Self {
            fajr: "05:30".into(),
            sunrise: "06:45".into(),
            dhuhr: "12:15".into(),
            asr: "15:45".into(),
            maghrib: "18:20".into(),
            isha: "19:45".into(),
        }
    }

    pub fn time_of(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const DAY: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub const OBLIGATORY: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn arabic(self) -> &'static str {
        match self {
            Prayer::Fajr => "الفجر",
            Prayer::Sunrise => "الشروق",
            Prayer::Dhuhr => "الظهر",
            Prayer::Asr => "العصر",
            Prayer::Maghrib => "المغرب",
            Prayer::Isha => "العشاء",
        }
    }
}

/// Parses `HH:MM`, tolerating a trailing zone label such as `05:12 (EET)`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.split_whitespace().next()?;
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}

pub fn split_location(location: &str) -> (String, String) {
    let mut parts = location.split(',');
    let city = parts.next().unwrap_or_default().trim().to_string();
    let country = parts.next().unwrap_or_default().trim().to_string();
    (city, country)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub current: Option<Prayer>,
    pub next: Prayer,
    pub next_time: String,
    pub countdown: String,
}

/// Current and next prayer of the day. After Isha the next one is tomorrow's
/// Fajr; before Fajr there is no current prayer.
pub fn schedule(times: &PrayerTimes, now: NaiveTime) -> Schedule {
    let mut current = None;
    let mut next = None;

    for (index, prayer) in Prayer::DAY.iter().enumerate() {
        let Some(at) = parse_time(times.time_of(*prayer)) else {
            continue;
        };
        if now >= at {
            current = Some(*prayer);
            next = Some(Prayer::DAY.get(index + 1).copied().unwrap_or(Prayer::Fajr));
        } else {
            if next.is_none() {
                next = Some(*prayer);
            }
            break;
        }
    }

    let next = next.unwrap_or(Prayer::Fajr);
    let next_time = times.time_of(next).to_string();
    let seconds = parse_time(&next_time)
        .map(|at| seconds_until(now, at))
        .unwrap_or_default();

    Schedule {
        current,
        next,
        next_time,
        countdown: format_countdown(seconds),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextPrayer {
    pub prayer: Prayer,
    pub arabic: String,
    pub time: String,
    pub time_12h: String,
    pub hours_left: i64,
    pub minutes_left: i64,
}

/// The next of the five obligatory prayers, wrapping to Fajr after Isha.
pub fn next_obligatory(times: &PrayerTimes, now: NaiveTime) -> NextPrayer {
    let prayer = Prayer::OBLIGATORY
        .into_iter()
        .find(|prayer| parse_time(times.time_of(*prayer)).is_some_and(|at| at > now))
        .unwrap_or(Prayer::Fajr);

    let time = times.time_of(prayer).to_string();
    let seconds = parse_time(&time)
        .map(|at| seconds_until(now, at))
        .unwrap_or_default();

    NextPrayer {
        prayer,
        arabic: prayer.arabic().to_string(),
        time_12h: format_12_hour(&time).unwrap_or_else(|| time.clone()),
        time,
        hours_left: seconds / 3600,
        minutes_left: (seconds % 3600) / 60,
    }
}

fn seconds_until(now: NaiveTime, at: NaiveTime) -> i64 {
    let diff = (at - now).num_seconds();
    if diff <= 0 { diff + 24 * 3600 } else { diff }
}

fn format_countdown(seconds: i64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// `13:05` becomes `1:05 م`.
pub fn format_12_hour(raw: &str) -> Option<String> {
    let time = parse_time(raw)?;
    let suffix = if time.hour() >= 12 { "م" } else { "ص" };
    let hour = match time.hour() % 12 {
        0 => 12,
        hour => hour,
    };
    Some(format!("{hour}:{:02} {suffix}", time.minute()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn schedule_between_prayers() {
        let times = PrayerTimes::fallback();
        let schedule = schedule(&times, time(13, 0, 0));
        assert_eq!(schedule.current, Some(Prayer::Dhuhr));
        assert_eq!(schedule.next, Prayer::Asr);
        assert_eq!(schedule.countdown, "02:45:00");
    }

    #[test]
    fn schedule_before_fajr_has_no_current_prayer() {
        let times = PrayerTimes::fallback();
        let schedule = schedule(&times, time(4, 0, 30));
        assert_eq!(schedule.current, None);
        assert_eq!(schedule.next, Prayer::Fajr);
        assert_eq!(schedule.countdown, "01:29:30");
    }

    #[test]
    fn schedule_after_isha_waits_for_tomorrows_fajr() {
        let times = PrayerTimes::fallback();
        let schedule = schedule(&times, time(22, 0, 0));
        assert_eq!(schedule.current, Some(Prayer::Isha));
        assert_eq!(schedule.next, Prayer::Fajr);
        assert_eq!(schedule.countdown, "07:30:00");
    }

    #[test]
    fn next_obligatory_skips_sunrise() {
        let times = PrayerTimes::fallback();
        let next = next_obligatory(&times, time(6, 0, 0));
        assert_eq!(next.prayer, Prayer::Dhuhr);
        assert_eq!(next.arabic, "الظهر");
        assert_eq!(next.hours_left, 6);
        assert_eq!(next.minutes_left, 15);
        assert_eq!(next.time_12h, "12:15 م");
    }

    #[test]
    fn parse_time_ignores_zone_suffix() {
        assert_eq!(parse_time("05:12 (EET)"), Some(time(5, 12, 0)));
        assert_eq!(parse_time("nope"), None);
    }

    #[test]
    fn location_splits_into_city_and_country() {
        assert_eq!(
            split_location(" Cairo , Egypt"),
            ("Cairo".to_string(), "Egypt".to_string())
        );
        assert_eq!(split_location("Medina"), ("Medina".to_string(), String::new()));
    }

    #[test]
    fn twelve_hour_format_uses_arabic_suffixes() {
        assert_eq!(format_12_hour("00:07").as_deref(), Some("12:07 ص"));
        assert_eq!(format_12_hour("19:45").as_deref(), Some("7:45 م"));
    }
}
