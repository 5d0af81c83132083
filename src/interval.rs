use crate::time::TimeOfDay;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An ON/OFF pair exactly as entered for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterval {
    pub on: TimeOfDay,
    pub off: TimeOfDay,
}

impl RawInterval {
    pub fn new(on: TimeOfDay, off: TimeOfDay) -> Self {
        RawInterval { on, off }
    }

    /// Places the pair on the reference day. An OFF time earlier than or equal
    /// to the ON time is read as the next day, so `on == off` spans 24 hours.
    pub fn normalize(&self, reference: NaiveDate) -> NormalizedInterval {
        let start = self.on.on(reference);
        let end_candidate = self.off.on(reference);
        let end = if end_candidate <= start {
            end_candidate + Duration::days(1)
        } else {
            end_candidate
        };
        NormalizedInterval { start, end }
    }
}

/// Absolute span with `start < end` and at most 24 hours long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl NormalizedInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn minutes(&self) -> f64 {
        self.duration().num_minutes() as f64
    }

    #[cfg(test)]
    pub(crate) fn is_overlapping(&self, other: &NormalizedInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
