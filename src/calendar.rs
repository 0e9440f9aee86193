use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Holidays that the calendar highlights as major events.
const MAJOR_HOLIDAYS: &[&str] = &[
    "Islamic New Year",
    "Day of Ashura",
    "Mawlid an-Nabi",
    "Eid al-Fitr",
    "Eid al-Adha",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub en: String,
    pub ar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriMonth {
    pub number: u32,
    pub en: String,
    pub ar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    pub day: String,
    pub month: HijriMonth,
    pub year: String,
    pub weekday: LocalizedName,
}

impl HijriDate {
    /// Shown when the conversion service is unreachable.
    pub fn fallback() -> Self {
        Self {
            day: "15".into(),
            month: HijriMonth {
                number: 5,
                en: "Jumada al-awwal".into(),
                ar: "جمادى الأولى".into(),
            },
            year: "1446".into(),
            weekday: LocalizedName {
                en: "Monday".into(),
                ar: "الاثنين".into(),
            },
        }
    }

    pub fn arabic_label(&self) -> String {
        format!(
            "{}، {} {} {}",
            self.weekday.ar, self.day, self.month.ar, self.year
        )
    }
}

/// One day of the Hijri month calendar as the conversion service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDay {
    pub hijri: CalendarHijri,
    pub gregorian: CalendarGregorian,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarHijri {
    pub date: String,
    pub day: String,
    pub month: HijriMonth,
    #[serde(default)]
    pub holidays: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarGregorian {
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Major,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub date: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub gregorian_date: Option<NaiveDate>,
}

pub fn classify(holiday: &str) -> EventKind {
    if MAJOR_HOLIDAYS.contains(&holiday) {
        EventKind::Major
    } else {
        EventKind::Minor
    }
}

/// Keeps the days carrying at least one holiday, named after the first one.
pub fn islamic_events(days: &[CalendarDay]) -> Vec<Event> {
    days.iter()
        .filter_map(|day| day.hijri.holidays.first().map(|holiday| (day, holiday)))
        .enumerate()
        .map(|(index, (day, holiday))| Event {
            id: format!("hijri-{}-{index}", day.hijri.date),
            name: holiday.clone(),
            name_ar: holiday.clone(),
            date: format!("{} {}", day.hijri.day, day.hijri.month.en),
            description: holiday.clone(),
            kind: classify(holiday),
            gregorian_date: NaiveDate::parse_from_str(&day.gregorian.date, "%d-%m-%Y").ok(),
        })
        .collect()
}

pub fn gregorian_events(year: i32) -> Vec<Event> {
    let fixed = |month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day);
    let entries = [
        ("jan-1", "New Year's Day", "رأس السنة الميلادية", "Celebration of the new Gregorian year", EventKind::Major, fixed(1, 1)),
        ("easter", "Easter Sunday", "عيد الفصح", "Christian celebration of Jesus' resurrection", EventKind::Major, easter_sunday(year)),
        ("jul-4", "Independence Day", "عيد الاستقلال", "Commemoration of U.S. independence", EventKind::Major, fixed(7, 4)),
        ("oct-31", "Halloween", "الهالوين", "Evening of costumes and festivities", EventKind::Minor, fixed(10, 31)),
        ("thanksgiving", "Thanksgiving", "عيد الشكر", "Day of gratitude and feasting", EventKind::Major, NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Thu, 4)),
        ("dec-25", "Christmas", "عيد الميلاد", "Christian celebration of Jesus' birth", EventKind::Major, fixed(12, 25)),
    ];

    entries
        .into_iter()
        .map(|(id, name, name_ar, description, kind, date)| Event {
            id: id.to_string(),
            name: name.to_string(),
            name_ar: name_ar.to_string(),
            date: date
                .map(|date| date.format("%-d %B").to_string())
                .unwrap_or_default(),
            description: description.to_string(),
            kind,
            gregorian_date: date,
        })
        .collect()
}

/// Anonymous Gregorian computus.
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarOverview {
    pub gregorian_date: NaiveDate,
    pub gregorian_weekday: String,
    pub hijri: HijriDate,
    pub hijri_label: String,
    pub fallback: bool,
    pub islamic_events: Vec<Event>,
    pub gregorian_events: Vec<Event>,
}

impl CalendarOverview {
    pub fn new(today: NaiveDate, hijri: Option<HijriDate>, islamic_events: Vec<Event>) -> Self {
        let fallback = hijri.is_none();
        let hijri = hijri.unwrap_or_else(HijriDate::fallback);
        Self {
            gregorian_date: today,
            gregorian_weekday: today.weekday().to_string(),
            hijri_label: hijri.arabic_label(),
            hijri,
            fallback,
            islamic_events,
            gregorian_events: gregorian_events(today.year()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(date: &str, gregorian: &str, holidays: &[&str]) -> CalendarDay {
        serde_json::from_value(json!({
            "hijri": {
                "date": date,
                "day": &date[..2],
                "month": { "number": 1, "en": "Muḥarram", "ar": "مُحَرَّم" },
                "holidays": holidays,
            },
            "gregorian": { "date": gregorian },
        }))
        .unwrap()
    }

    #[test]
    fn only_days_with_holidays_become_events() {
        let days = vec![
            day("01-01-1446", "07-07-2024", &["Islamic New Year"]),
            day("02-01-1446", "08-07-2024", &[]),
            day("09-01-1446", "15-07-2024", &["Beginning of the holy months"]),
            day("10-01-1446", "16-07-2024", &["Day of Ashura"]),
        ];

        let events = islamic_events(&days);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::Major);
        assert_eq!(events[1].kind, EventKind::Minor);
        assert_eq!(events[2].name, "Day of Ashura");
        assert_eq!(events[2].id, "hijri-10-01-1446-2");
        assert_eq!(events[0].gregorian_date, NaiveDate::from_ymd_opt(2024, 7, 7));
    }

    #[test]
    fn gregorian_events_follow_the_year() {
        let events = gregorian_events(2025);
        let easter = events.iter().find(|event| event.id == "easter").unwrap();
        assert_eq!(easter.gregorian_date, NaiveDate::from_ymd_opt(2025, 4, 20));
        let thanksgiving = events.iter().find(|event| event.id == "thanksgiving").unwrap();
        assert_eq!(thanksgiving.gregorian_date, NaiveDate::from_ymd_opt(2025, 11, 27));
        assert_eq!(events[0].date, "1 January");
    }

    #[test]
    fn overview_uses_fallback_when_conversion_failed() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 18).unwrap();
        let overview = CalendarOverview::new(today, None, Vec::new());
        assert!(overview.fallback);
        assert_eq!(overview.hijri.year, "1446");
        assert_eq!(overview.hijri_label, "الاثنين، 15 جمادى الأولى 1446");
    }
}
