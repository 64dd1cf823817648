use chrono::Datelike;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// A valid day in the Gregorian calendar. Month is in 1..=12, day in
/// 1..=days_in_month, enforced on construction. The textual interchange
/// format is `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!("month out of range: {}", month),
    }
}

/// Maps a native weekday (Sunday = 0 .. Saturday = 6) to a Monday-first
/// index (Monday = 0 .. Sunday = 6).
pub fn monday_first_index(native_weekday: u32) -> u32 {
    (native_weekday + 6) % 7
}

/// Purely lexical check: 10 characters, hyphens at indices 4 and 7, ASCII
/// digits everywhere else. Does not verify the triple is a real calendar
/// day; that is the job of `parse_iso_date`.
pub fn is_valid_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

/// Parses `YYYY-MM-DD`. Returns `None` for anything that is not a real
/// calendar day: malformed text, month 13, Feb 30, Feb 29 outside leap
/// years. Never panics.
pub fn parse_iso_date(s: &str) -> Option<CalendarDate> {
    if !is_valid_iso_date(s) {
        return None;
    }

    let year = s[0..4].parse().ok()?;
    let month = s[5..7].parse().ok()?;
    let day = s[8..10].parse().ok()?;

    CalendarDate::new(year, month, day)
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return None;
        }

        Some(CalendarDate { year, month, day })
    }

    pub fn today() -> Self {
        let now = chrono::Local::now().date_naive();

        CalendarDate {
            year: now.year(),
            month: now.month(),
            day: now.day(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn start_of_month(self) -> Self {
        CalendarDate { day: 1, ..self }
    }

    /// Next calendar day, rolling over month and year boundaries.
    pub fn succ(self) -> Self {
        if self.day < days_in_month(self.year, self.month) {
            CalendarDate {
                day: self.day + 1,
                ..self
            }
        } else if self.month < 12 {
            CalendarDate {
                year: self.year,
                month: self.month + 1,
                day: 1,
            }
        } else {
            CalendarDate {
                year: self.year + 1,
                month: 1,
                day: 1,
            }
        }
    }

    /// Previous calendar day, rolling under month and year boundaries.
    pub fn pred(self) -> Self {
        if self.day > 1 {
            CalendarDate {
                day: self.day - 1,
                ..self
            }
        } else if self.month > 1 {
            CalendarDate {
                year: self.year,
                month: self.month - 1,
                day: days_in_month(self.year, self.month - 1),
            }
        } else {
            CalendarDate {
                year: self.year - 1,
                month: 12,
                day: 31,
            }
        }
    }

    pub fn add_days(self, delta: i64) -> Self {
        let mut date = self;

        if delta >= 0 {
            for _ in 0..delta {
                date = date.succ();
            }
        } else {
            for _ in 0..-delta {
                date = date.pred();
            }
        }

        date
    }

    /// Shifts by whole months, carrying into the year as needed and
    /// clamping the day against the target month's length: Jan 31 + 1
    /// month is Feb 28 (29 in leap years), not an overflow into March.
    /// Because of clamping, `add_months(add_months(d, 1), -1)` need not
    /// equal `d`.
    pub fn add_months(self, delta: i32) -> Self {
        let months = self.year * 12 + (self.month as i32 - 1) + delta;
        let year = months.div_euclid(12);
        let month = months.rem_euclid(12) as u32 + 1;

        CalendarDate {
            year,
            month,
            day: self.day.min(days_in_month(year, month)),
        }
    }

    /// Weekday with the common Sunday = 0 .. Saturday = 6 convention,
    /// computed by Sakamoto's method.
    pub fn weekday(&self) -> u32 {
        const OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

        let year = if self.month < 3 {
            self.year - 1
        } else {
            self.year
        };

        (year + year.div_euclid(4) - year.div_euclid(100)
            + year.div_euclid(400)
            + OFFSETS[(self.month - 1) as usize]
            + self.day as i32)
            .rem_euclid(7) as u32
    }

    /// Weekday as a Monday-first index (Monday = 0 .. Sunday = 6).
    pub fn weekday_from_monday(&self) -> u32 {
        monday_first_index(self.weekday())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_iso_date(s).ok_or_else(|| {
            Error::new(
                ErrorKind::DateParse,
                format!("'{}' is not a valid date (expected YYYY-MM-DD)", s).as_str(),
            )
        })
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_iso_date(&s)
            .ok_or_else(|| de::Error::custom(format!("'{}' is not a valid date", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        parse_iso_date(s).expect(s)
    }

    #[test]
    fn iso_round_trip() {
        for s in &["2026-01-01", "2024-02-29", "1999-12-31", "2025-07-04"] {
            let d = date(s);
            assert_eq!(parse_iso_date(&d.to_string()), Some(d));
        }
    }

    #[test]
    fn lexical_validity_is_not_sufficient() {
        assert!(is_valid_iso_date("2024-02-30"));
        assert_eq!(parse_iso_date("2024-02-30"), None);
    }

    #[test]
    fn lexical_check_rejects_malformed_input() {
        assert!(!is_valid_iso_date("2026-1-4"));
        assert!(!is_valid_iso_date("2026/01/04"));
        assert!(!is_valid_iso_date(""));
        assert!(!is_valid_iso_date("2026-01-041"));
        assert_eq!(parse_iso_date("2026-1-4"), None);
    }

    #[test]
    fn leap_years() {
        assert!(parse_iso_date("2024-02-29").is_some());
        assert!(parse_iso_date("2023-02-29").is_none());
        assert!(parse_iso_date("2000-02-29").is_some());
        assert!(parse_iso_date("1900-02-29").is_none());
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(date("2025-01-31").add_months(1), date("2025-02-28"));
        assert_eq!(date("2024-01-31").add_months(1), date("2024-02-29"));
        assert_eq!(date("2025-03-31").add_months(-1), date("2025-02-28"));
    }

    #[test]
    fn add_months_carries_year() {
        assert_eq!(date("2025-11-15").add_months(2), date("2026-01-15"));
        assert_eq!(date("2025-02-15").add_months(-2), date("2024-12-15"));
        assert_eq!(date("2025-06-15").add_months(30), date("2027-12-15"));
    }

    #[test]
    fn add_months_round_trip_after_clamping() {
        // Clamping is deliberately not invertible.
        let back = date("2025-01-31").add_months(1).add_months(-1);
        assert_eq!(back, date("2025-01-28"));
    }

    #[test]
    fn weekday_mapping() {
        assert_eq!(monday_first_index(0), 6);
        assert_eq!(monday_first_index(1), 0);
        assert_eq!(monday_first_index(6), 5);
    }

    #[test]
    fn weekday_of_known_dates() {
        // 2026-01-01 is a Thursday.
        assert_eq!(date("2026-01-01").weekday(), 4);
        assert_eq!(date("2026-01-01").weekday_from_monday(), 3);
        // 2025-12-29 is a Monday.
        assert_eq!(date("2025-12-29").weekday_from_monday(), 0);
        // 2000-01-01 was a Saturday.
        assert_eq!(date("2000-01-01").weekday(), 6);
    }

    #[test]
    fn day_stepping_rolls_over() {
        assert_eq!(date("2025-12-31").succ(), date("2026-01-01"));
        assert_eq!(date("2026-01-01").pred(), date("2025-12-31"));
        assert_eq!(date("2024-02-28").succ(), date("2024-02-29"));
        assert_eq!(date("2025-02-28").succ(), date("2025-03-01"));
        assert_eq!(date("2026-01-04").add_days(-6), date("2025-12-29"));
        assert_eq!(date("2025-12-29").add_days(41), date("2026-02-08"));
    }

    #[test]
    fn serde_uses_iso_strings() {
        let d = date("2026-01-04");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2026-01-04\"");
        assert_eq!(
            serde_json::from_str::<CalendarDate>("\"2026-01-04\"").unwrap(),
            d
        );
        assert!(serde_json::from_str::<CalendarDate>("\"2026-02-30\"").is_err());
    }
}
