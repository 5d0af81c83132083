use crate::unit::Unit;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StationError {
    #[error("hour must be between 0 and 23, got {0}")]
    InvalidHour(u32),

    #[error("minute must be between 0 and 59, got {0}")]
    InvalidMinute(u32),

    #[error("invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("unknown unit '{0}', expected one of 1-4")]
    UnknownUnit(String),

    #[error("invalid interval index '{0}'")]
    InvalidIndex(String),

    #[error("{unit} has {len} interval(s), no interval at index {index}")]
    IndexOutOfBounds { unit: Unit, index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StationError>;
