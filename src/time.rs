use crate::error::StationError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference day onto which every time of day is mapped when no other date is configured.
pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

/// Hour and minute on an unspecified day.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, StationError> {
        if hour > 23 {
            return Err(StationError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(StationError::InvalidMinute(minute));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(TimeOfDay)
            .ok_or_else(|| StationError::InvalidTime(format!("{}:{}", hour, minute)))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StationError::InvalidTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse::<u32>().map_err(|_| invalid())?;
        let minute = minute.parse::<u32>().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = StationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Renders an instant as `DAY<n> HH:MM`, counting days from the reference date.
pub fn day_label(instant: NaiveDateTime, reference: NaiveDate) -> String {
    let days = (instant.date() - reference).num_days();
    format!("DAY{} {:02}:{:02}", days + 1, instant.hour(), instant.minute())
}
