use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Display language for month and weekday names. Resolution is a caller
/// concern; the name lookups below take the locale explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "DE")]
    De,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            _ => Err(Error::new(
                ErrorKind::ConfigParse,
                format!("unknown locale '{}' (expected EN or DE)", s).as_str(),
            )),
        }
    }
}

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "M\u{e4}rz",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

const WEEKDAYS_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const WEEKDAYS_DE: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

/// Name of a calendar month (1..=12).
pub fn month_name(month: u32, locale: Locale) -> &'static str {
    let names = match locale {
        Locale::En => &MONTHS_EN,
        Locale::De => &MONTHS_DE,
    };

    names[(month - 1) as usize]
}

/// Short name of a weekday by Monday-first index (Monday = 0 .. Sunday = 6).
pub fn weekday_name(index: u32, locale: Locale) -> &'static str {
    let names = match locale {
        Locale::En => &WEEKDAYS_EN,
        Locale::De => &WEEKDAYS_DE,
    };

    names[index as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names() {
        assert_eq!(month_name(1, Locale::En), "January");
        assert_eq!(month_name(12, Locale::En), "December");
        assert_eq!(month_name(3, Locale::De), "M\u{e4}rz");
    }

    #[test]
    fn weekday_names_are_monday_first() {
        assert_eq!(weekday_name(0, Locale::En), "Mon");
        assert_eq!(weekday_name(6, Locale::En), "Sun");
        assert_eq!(weekday_name(2, Locale::De), "Mi");
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("DE".parse::<Locale>().unwrap(), Locale::De);
        assert!("fr".parse::<Locale>().is_err());
    }
}
