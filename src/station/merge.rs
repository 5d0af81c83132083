use crate::interval::NormalizedInterval;

/// Collapses the pooled intervals into the sorted, disjoint cover of their union.
/// Touching intervals (`next.start == prev.end`) are joined into one run.
pub fn merge(mut intervals: Vec<NormalizedInterval>) -> Vec<NormalizedInterval> {
    intervals.sort_by_key(|i| i.start);

    let mut merged: Vec<NormalizedInterval> = Vec::with_capacity(intervals.len());
    for cur in intervals {
        match merged.last_mut() {
            Some(last) if cur.start <= last.end => {
                last.end = last.end.max(cur.end);
            }
            _ => merged.push(cur),
        }
    }
    merged
}

/// Wall-clock minutes during which at least one interval is running.
pub fn union_minutes(intervals: Vec<NormalizedInterval>) -> f64 {
    merge(intervals).iter().map(NormalizedInterval::minutes).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::RawInterval;
    use crate::time::{TimeOfDay, default_reference_date};

    fn norm(on: &str, off: &str) -> NormalizedInterval {
        RawInterval::new(on.parse::<TimeOfDay>().unwrap(), off.parse().unwrap())
            .normalize(default_reference_date())
    }

    #[test]
    fn test_empty_set() {
        assert!(merge(vec![]).is_empty());
        assert_eq!(0.0, union_minutes(vec![]));
    }

    #[test]
    fn test_touching_intervals_join() {
        let merged = merge(vec![norm("02:00", "03:00"), norm("01:00", "02:00")]);
        assert_eq!(vec![norm("01:00", "03:00")], merged);
    }

    #[test]
    fn test_contained_interval_does_not_shrink_group() {
        let merged = merge(vec![norm("08:00", "18:00"), norm("09:00", "10:00")]);
        assert_eq!(vec![norm("08:00", "18:00")], merged);
    }

    #[test]
    fn test_disjoint_intervals_stay_apart() {
        let merged = merge(vec![norm("05:00", "06:00"), norm("01:00", "02:00")]);
        assert_eq!(vec![norm("01:00", "02:00"), norm("05:00", "06:00")], merged);
        assert_eq!(120.0, union_minutes(merged));
    }

    #[test]
    fn test_wrapped_interval_absorbs_late_evening() {
        let merged = merge(vec![norm("23:00", "23:30"), norm("22:00", "06:00")]);
        assert_eq!(vec![norm("22:00", "06:00")], merged);
    }

    #[test]
    fn test_same_start_keeps_longest_end() {
        let merged = merge(vec![norm("07:00", "08:00"), norm("07:00", "12:00"), norm("07:00", "09:00")]);
        assert_eq!(vec![norm("07:00", "12:00")], merged);
    }
}
