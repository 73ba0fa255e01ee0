use chrono::{DateTime, Utc};
use thiserror::Error;

pub type SliderResult<T> = Result<T, SliderError>;

#[derive(Debug, Error)]
pub enum SliderError {
    #[error("invalid time axis: start={start} must be before end={end}")]
    InvalidAxis {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}
