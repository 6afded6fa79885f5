use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown weekday: {0}")]
pub struct UnknownWeekday(pub String);

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps from Friday back to Monday.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Wraps from Monday back to Friday.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownWeekday(s.to_string()))
    }
}

/// One scheduled class occurrence. Wire field names are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none", serialize_with = "none_as_empty")]
    pub room: Option<String>,
    pub day: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl ClassEntry {
    pub fn time_range_label(&self) -> String {
        format!(
            "{} - {}",
            format_time_12h(self.start_time),
            format_time_12h(self.end_time)
        )
    }
}

/// `14:05` -> `2:05 PM`, `00:30` -> `12:30 AM`.
pub fn format_time_12h(time: NaiveTime) -> String {
    let hour = time.hour();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, time.minute(), meridiem)
}

pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn parse_clock_time(input: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw)
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|room| !room.trim().is_empty()))
}

fn none_as_empty<S: Serializer>(room: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(room.as_deref().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn formats_morning_time() {
        assert_eq!(format_time_12h(time(9, 0)), "9:00 AM");
    }

    #[test]
    fn formats_noon_as_pm() {
        assert_eq!(format_time_12h(time(12, 15)), "12:15 PM");
    }

    #[test]
    fn formats_midnight_as_twelve_am() {
        assert_eq!(format_time_12h(time(0, 30)), "12:30 AM");
    }

    #[test]
    fn formats_afternoon_time() {
        assert_eq!(format_time_12h(time(14, 5)), "2:05 PM");
    }

    #[test]
    fn weekday_cycles_within_school_week() {
        assert_eq!(Weekday::Friday.next(), Weekday::Monday);
        assert_eq!(Weekday::Monday.prev(), Weekday::Friday);
        assert_eq!(Weekday::Tuesday.next(), Weekday::Wednesday);
    }

    #[test]
    fn weekday_parses_case_insensitively() {
        assert_eq!("thursday".parse::<Weekday>(), Ok(Weekday::Thursday));
        assert!("Saturday".parse::<Weekday>().is_err());
    }

    #[test]
    fn entry_deserializes_from_wire_format() {
        let json = r#"{"name":"Biology","room":"Prof. Shad","day":"Monday","startTime":"09:00","endTime":"10:00"}"#;

        let entry: ClassEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.name, "Biology");
        assert_eq!(entry.room.as_deref(), Some("Prof. Shad"));
        assert_eq!(entry.day, Weekday::Monday);
        assert_eq!(entry.start_time, time(9, 0));
        assert_eq!(entry.time_range_label(), "9:00 AM - 10:00 AM");
    }

    #[test]
    fn empty_room_reads_as_absent() {
        let json = r#"{"name":"Chemistry","room":"","day":"Friday","startTime":"13:00","endTime":"14:30"}"#;

        let entry: ClassEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.room, None);
    }

    #[test]
    fn missing_room_reads_as_absent() {
        let json = r#"{"name":"Chemistry","day":"Friday","startTime":"13:00","endTime":"14:30"}"#;

        let entry: ClassEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.room, None);
    }

    #[test]
    fn absent_room_is_written_as_empty_string() {
        let entry = ClassEntry {
            name: "Chemistry".to_string(),
            room: None,
            day: Weekday::Friday,
            start_time: time(8, 5),
            end_time: time(9, 0),
        };

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["room"], "");
        assert_eq!(value["startTime"], "08:05");
        assert_eq!(value["endTime"], "09:00");
    }

    #[test]
    fn malformed_time_is_rejected() {
        let json = r#"{"name":"X","day":"Monday","startTime":"25:00","endTime":"26:00"}"#;
        assert!(serde_json::from_str::<ClassEntry>(json).is_err());
    }

    proptest! {
        #[test]
        fn time_order_matches_zero_padded_string_order(
            h1 in 0u32..24, m1 in 0u32..60, h2 in 0u32..24, m2 in 0u32..60
        ) {
            let a = time(h1, m1);
            let b = time(h2, m2);
            prop_assert_eq!(a < b, format_clock_time(a) < format_clock_time(b));
        }

        #[test]
        fn twelve_hour_format_keeps_minutes(h in 0u32..24, m in 0u32..60) {
            let formatted = format_time_12h(time(h, m));
            let expected_suffix = format!(":{:02} {}", m, if h >= 12 { "PM" } else { "AM" });
            prop_assert!(formatted.ends_with(&expected_suffix));
        }
    }
}
