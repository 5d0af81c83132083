use crate::interval::{NormalizedInterval, RawInterval};
use crate::time::day_label;
use crate::unit::Unit;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeReport {
    pub per_unit_minutes: BTreeMap<Unit, f64>,
    pub combined_minutes: f64,
    pub station_minutes: f64,
}

impl RuntimeReport {
    pub fn unit_minutes(&self, unit: Unit) -> f64 {
        self.per_unit_minutes.get(&unit).copied().unwrap_or(0.0)
    }

    pub fn rows(&self) -> Vec<TotalRow> {
        let mut rows = self
            .per_unit_minutes
            .iter()
            .map(|(unit, minutes)| TotalRow::new(unit.to_string(), *minutes))
            .collect::<Vec<_>>();
        rows.push(TotalRow::new("Combined".to_string(), self.combined_minutes));
        rows.push(TotalRow::new("Station".to_string(), self.station_minutes));
        rows
    }
}

/// `90.0` renders as `1.50 hours (1 hour(s) and 30 minute(s))`. The hour and
/// minute parts come from the whole minute count, not from the rounded hours.
pub fn format_hours(minutes: f64) -> String {
    let whole = minutes.max(0.0).floor() as u64;
    format!(
        "{:.2} hours ({} hour(s) and {} minute(s))",
        minutes / 60.0,
        whole / 60,
        whole % 60
    )
}

#[derive(Tabled)]
pub struct TotalRow {
    #[tabled(rename = "Total")]
    pub label: String,
    #[tabled(rename = "Minutes")]
    pub minutes: f64,
    #[tabled(rename = "Runtime")]
    pub runtime: String,
}

impl TotalRow {
    fn new(label: String, minutes: f64) -> Self {
        TotalRow {
            label,
            minutes,
            runtime: format_hours(minutes),
        }
    }
}

#[derive(Tabled)]
pub struct IntervalRow {
    #[tabled(rename = "Unit")]
    pub unit: Unit,
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "On")]
    pub on: String,
    #[tabled(rename = "Off")]
    pub off: String,
    #[tabled(rename = "Start")]
    pub start: String,
    #[tabled(rename = "End")]
    pub end: String,
    #[tabled(rename = "Runtime")]
    pub runtime: String,
}

impl IntervalRow {
    pub fn new(unit: Unit, index: usize, interval: &RawInterval, reference: NaiveDate) -> Self {
        let normalized = interval.normalize(reference);
        IntervalRow {
            unit,
            index,
            on: interval.on.to_string(),
            off: interval.off.to_string(),
            start: day_label(normalized.start, reference),
            end: day_label(normalized.end, reference),
            runtime: format_hours(normalized.minutes()),
        }
    }
}

#[derive(Tabled)]
pub struct GroupRow {
    #[tabled(rename = "Group")]
    pub index: usize,
    #[tabled(rename = "Start")]
    pub start: String,
    #[tabled(rename = "End")]
    pub end: String,
    #[tabled(rename = "Runtime")]
    pub runtime: String,
}

impl GroupRow {
    pub fn new(index: usize, group: &NormalizedInterval, reference: NaiveDate) -> Self {
        GroupRow {
            index,
            start: day_label(group.start, reference),
            end: day_label(group.end, reference),
            runtime: format_hours(group.minutes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{TimeOfDay, default_reference_date};

    #[test]
    fn test_format_hours_and_minutes() {
        assert_eq!("1.50 hours (1 hour(s) and 30 minute(s))", format_hours(90.0));
        assert_eq!("0.00 hours (0 hour(s) and 0 minute(s))", format_hours(0.0));
        assert_eq!("24.00 hours (24 hour(s) and 0 minute(s))", format_hours(1440.0));
    }

    #[test]
    fn test_format_hours_parts_not_taken_from_rounded_value() {
        // 119 min rounds to 1.98 hours, but is still 1 hour and 59 minutes
        assert_eq!("1.98 hours (1 hour(s) and 59 minute(s))", format_hours(119.0));
        assert_eq!("0.02 hours (0 hour(s) and 1 minute(s))", format_hours(1.0));
        assert_eq!("9.00 hours (9 hour(s) and 0 minute(s))", format_hours(540.0));
    }

    #[test]
    fn test_rows_list_units_then_totals() {
        let mut per_unit = BTreeMap::new();
        for unit in Unit::ALL {
            per_unit.insert(unit, 0.0);
        }
        per_unit.insert(Unit::Unit2, 120.0);
        let report = RuntimeReport {
            per_unit_minutes: per_unit,
            combined_minutes: 120.0,
            station_minutes: 120.0,
        };

        let rows = report.rows();
        assert_eq!(6, rows.len());
        assert_eq!("Unit 1", rows[0].label);
        assert_eq!(120.0, rows[1].minutes);
        assert_eq!("Combined", rows[4].label);
        assert_eq!("Station", rows[5].label);
        assert_eq!(0.0, report.unit_minutes(Unit::Unit4));
    }

    #[test]
    fn test_report_json_shape() {
        let report = RuntimeReport {
            per_unit_minutes: BTreeMap::from([(Unit::Unit1, 540.0)]),
            combined_minutes: 540.0,
            station_minutes: 540.0,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(540.0, json["perUnitMinutes"]["Unit1"]);
        assert_eq!(540.0, json["combinedMinutes"]);
        assert_eq!(540.0, json["stationMinutes"]);
    }

    #[test]
    fn test_interval_row_shows_next_day_end() {
        let reference = default_reference_date();
        let raw = RawInterval::new(TimeOfDay::new(22, 0).unwrap(), TimeOfDay::new(6, 0).unwrap());
        let row = IntervalRow::new(Unit::Unit1, 0, &raw, reference);
        assert_eq!("DAY1 22:00", row.start);
        assert_eq!("DAY2 06:00", row.end);
        assert_eq!("8.00 hours (8 hour(s) and 0 minute(s))", row.runtime);
    }
}
