use crate::error::StationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Unit {
    Unit1,
    Unit2,
    Unit3,
    Unit4,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Unit1, Unit::Unit2, Unit::Unit3, Unit::Unit4];

    pub fn number(self) -> u8 {
        match self {
            Unit::Unit1 => 1,
            Unit::Unit2 => 2,
            Unit::Unit3 => 3,
            Unit::Unit4 => 4,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit {}", self.number())
    }
}

/// Accepts `2`, `u2` or `unit2` in any case.
impl FromStr for Unit {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("unit")
            .or_else(|| lower.strip_prefix('u'))
            .unwrap_or(lower.as_str());
        Unit::ALL
            .into_iter()
            .find(|u| digits == u.number().to_string())
            .ok_or_else(|| StationError::UnknownUnit(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_short_and_long_forms() {
        assert_eq!(Unit::Unit1, "1".parse().unwrap());
        assert_eq!(Unit::Unit2, "u2".parse().unwrap());
        assert_eq!(Unit::Unit3, "Unit3".parse().unwrap());
        assert_eq!(Unit::Unit4, " UNIT4 ".parse().unwrap());
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        assert!(matches!("5".parse::<Unit>(), Err(StationError::UnknownUnit(_))));
        assert!(matches!("unit".parse::<Unit>(), Err(StationError::UnknownUnit(_))));
        assert!(matches!("".parse::<Unit>(), Err(StationError::UnknownUnit(_))));
    }

    #[test]
    fn test_all_is_ordered() {
        let mut sorted = Unit::ALL;
        sorted.sort();
        assert_eq!(Unit::ALL, sorted);
        assert_eq!("Unit 3", Unit::Unit3.to_string());
    }
}
