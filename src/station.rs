use crate::error::{Result, StationError};
use crate::interval::{NormalizedInterval, RawInterval};
use crate::report::RuntimeReport;
use crate::time::TimeOfDay;
use crate::unit::Unit;
use chrono::NaiveDate;
use log::{debug, info, trace};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub mod merge;

#[cfg(test)]
mod tests;

/// Runtime in minutes of one unit's intervals, each normalized on `reference`.
pub fn unit_total(intervals: &[RawInterval], reference: NaiveDate) -> f64 {
    intervals
        .iter()
        .map(|i| i.normalize(reference).minutes())
        .sum()
}

/// Plain sum of the per-unit totals; concurrent runtime is counted once per unit.
pub fn combined_total(per_unit: &BTreeMap<Unit, f64>) -> f64 {
    per_unit.values().sum()
}

/// The entered intervals of every unit, in entry order.
pub struct Station {
    reference: NaiveDate,
    intervals: BTreeMap<Unit, Vec<RawInterval>>,
}

impl Station {
    pub fn new(reference: NaiveDate) -> Station {
        Station {
            reference,
            intervals: Unit::ALL.into_iter().map(|u| (u, Vec::new())).collect(),
        }
    }

    pub fn with_intervals(
        reference: NaiveDate,
        intervals: impl IntoIterator<Item = (Unit, RawInterval)>,
    ) -> Station {
        let mut station = Station::new(reference);
        for (unit, interval) in intervals {
            station.push(unit, interval);
        }
        station
    }

    pub fn load_from_file(path: &Path, reference: NaiveDate) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        #[derive(Deserialize)]
        struct Entry {
            unit: Unit,
            on: TimeOfDay,
            off: TimeOfDay,
        }
        #[derive(Deserialize)]
        struct RawData {
            #[serde(default)]
            intervals: Vec<Entry>,
        }
        let raw: RawData = serde_json::from_str(&data)?;
        info!("loaded {} interval(s) from {}", raw.intervals.len(), path.display());

        Ok(Station::with_intervals(
            reference,
            raw.intervals
                .into_iter()
                .map(|e| (e.unit, RawInterval::new(e.on, e.off))),
        ))
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    fn push(&mut self, unit: Unit, interval: RawInterval) {
        self.intervals.entry(unit).or_default().push(interval);
    }

    pub fn add_interval(&mut self, unit: Unit, on: TimeOfDay, off: TimeOfDay) {
        debug!("{}: add {}-{}", unit, on, off);
        self.push(unit, RawInterval::new(on, off));
    }

    pub fn remove_interval(&mut self, unit: Unit, index: usize) -> Result<RawInterval> {
        let list = self.intervals.entry(unit).or_default();
        if index >= list.len() {
            return Err(StationError::IndexOutOfBounds {
                unit,
                index,
                len: list.len(),
            });
        }
        let removed = list.remove(index);
        debug!("{}: removed #{} {}-{}", unit, index, removed.on, removed.off);
        Ok(removed)
    }

    pub fn clear_unit(&mut self, unit: Unit) {
        debug!("{}: cleared", unit);
        self.intervals.entry(unit).or_default().clear();
    }

    pub fn clear_all(&mut self) {
        debug!("all units cleared");
        self.intervals.values_mut().for_each(Vec::clear);
    }

    pub fn intervals(&self, unit: Unit) -> &[RawInterval] {
        self.intervals.get(&unit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.intervals.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every interval normalized on the reference date, tagged with its unit.
    pub fn normalized(&self) -> Vec<(Unit, NormalizedInterval)> {
        self.intervals
            .iter()
            .flat_map(|(unit, list)| list.iter().map(|i| (*unit, i.normalize(self.reference))))
            .collect()
    }

    /// Station groups: the merged union of all units' intervals.
    pub fn merged(&self) -> Vec<NormalizedInterval> {
        merge::merge(self.normalized().into_iter().map(|(_, n)| n).collect())
    }

    pub fn compute_results(&self) -> RuntimeReport {
        let per_unit_minutes = Unit::ALL
            .into_iter()
            .map(|u| (u, unit_total(self.intervals(u), self.reference)))
            .collect::<BTreeMap<Unit, f64>>();
        let combined_minutes = combined_total(&per_unit_minutes);
        let station_minutes =
            merge::union_minutes(self.normalized().into_iter().map(|(_, n)| n).collect());
        trace!(
            "recomputed {} interval(s): combined {} min, station {} min",
            self.len(),
            combined_minutes,
            station_minutes
        );

        RuntimeReport {
            per_unit_minutes,
            combined_minutes,
            station_minutes,
        }
    }
}
