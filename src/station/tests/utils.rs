use crate::interval::{NormalizedInterval, RawInterval};
use crate::station::Station;
use crate::time::{TimeOfDay, default_reference_date};
use crate::unit::Unit;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;

pub fn tod(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

pub fn raw(on: &str, off: &str) -> RawInterval {
    RawInterval::new(tod(on), tod(off))
}

pub fn norm(on: &str, off: &str) -> NormalizedInterval {
    raw(on, off).normalize(default_reference_date())
}

pub fn add_interval(station: &mut Station, unit: Unit, on: &str, off: &str) {
    station.add_interval(unit, tod(on), tod(off));
}

pub fn station(entries: &[(Unit, &str, &str)]) -> Station {
    Station::with_intervals(
        default_reference_date(),
        entries.iter().map(|(unit, on, off)| (*unit, raw(on, off))),
    )
}

pub fn arb_unit() -> impl Strategy<Value = Unit> {
    prop_oneof![
        Just(Unit::Unit1),
        Just(Unit::Unit2),
        Just(Unit::Unit3),
        Just(Unit::Unit4),
    ]
}

pub fn arb_time() -> impl Strategy<Value = TimeOfDay> {
    (0..24u32, 0..60u32).prop_map(|(h, m)| TimeOfDay::new(h, m).unwrap())
}

pub fn arb_raw() -> impl Strategy<Value = RawInterval> {
    (arb_time(), arb_time()).prop_map(|(on, off)| RawInterval::new(on, off))
}

pub fn arb_entry() -> impl Strategy<Value = (Unit, RawInterval)> {
    (arb_unit(), arb_raw())
}

pub fn minutes_of(t: TimeOfDay) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}
