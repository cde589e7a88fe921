use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::MenuError;

/// One serving day of the week, named the way the menu publisher names it.
#[derive(Debug, PartialEq, Eq)]
pub struct WeekdayEntry {
    pub local_name: &'static str,
    pub canonical_name: &'static str,
    pub weekday: Weekday,
}

pub static WEEKDAYS: [WeekdayEntry; 5] = [
    WeekdayEntry {
        local_name: "mandag",
        canonical_name: "monday",
        weekday: Weekday::Mon,
    },
    WeekdayEntry {
        local_name: "tirsdag",
        canonical_name: "tuesday",
        weekday: Weekday::Tue,
    },
    WeekdayEntry {
        local_name: "onsdag",
        canonical_name: "wednesday",
        weekday: Weekday::Wed,
    },
    WeekdayEntry {
        local_name: "torsdag",
        canonical_name: "thursday",
        weekday: Weekday::Thu,
    },
    WeekdayEntry {
        local_name: "fredag",
        canonical_name: "friday",
        weekday: Weekday::Fri,
    },
];

pub fn day_by_name(name: &str) -> Option<&'static WeekdayEntry> {
    let wanted = name.trim().to_lowercase();
    WEEKDAYS
        .iter()
        .find(|entry| entry.local_name == wanted || entry.canonical_name == wanted)
}

pub fn day_for(weekday: Weekday) -> Option<&'static WeekdayEntry> {
    WEEKDAYS.iter().find(|entry| entry.weekday == weekday)
}

fn valid_day_names() -> String {
    WEEKDAYS
        .iter()
        .map(|entry| format!("{}/{}", entry.local_name, entry.canonical_name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// ISO-8601 week number: week 1 is the week holding the year's first Thursday.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    let thursday = monday + Duration::days(3);
    // The first Thursday of a year always falls on one of its first seven
    // days, so whole weeks since then is the day-of-year divided by seven.
    1 + thursday.ordinal0() / 7
}

pub fn parse_week(raw: &str) -> Result<u32, MenuError> {
    match raw.trim().parse::<u32>() {
        Ok(week) if (1..=53).contains(&week) => Ok(week),
        _ => Err(MenuError::InvalidWeek(raw.to_string())),
    }
}

/// The week and day a run fetches the menu for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub week: u32,
    pub day: &'static WeekdayEntry,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), week {}",
            capitalize(self.day.local_name),
            capitalize(self.day.canonical_name),
            self.week
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn resolve_target(
    today: NaiveDate,
    week_override: Option<&str>,
    day_override: Option<&str>,
) -> Result<Target, MenuError> {
    let week = match week_override {
        Some(raw) => parse_week(raw)?,
        None => iso_week_number(today),
    };

    let day = match day_override {
        Some(raw) => day_by_name(raw).ok_or_else(|| MenuError::InvalidDay {
            input: raw.to_string(),
            valid: valid_day_names(),
        })?,
        None => day_for(today.weekday()).ok_or(MenuError::Weekend(today.weekday()))?,
    };

    Ok(Target { week, day })
}
