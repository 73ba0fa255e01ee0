use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::calendar::{SelectionGranularity, datetime_from_millis};
use crate::error::{SliderError, SliderResult};

/// Immutable UTC range a slider maps percentages against.
///
/// Replacing the range means building a new axis; nothing mutates one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeAxis {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    granularity: SelectionGranularity,
}

impl TimeAxis {
    /// Builds an axis; `start` must be strictly before `end`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: SelectionGranularity,
    ) -> SliderResult<Self> {
        if start >= end {
            return Err(SliderError::InvalidAxis { start, end });
        }
        Ok(Self {
            start,
            end,
            granularity,
        })
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn granularity(self) -> SelectionGranularity {
        self.granularity
    }

    #[must_use]
    pub fn with_granularity(self, granularity: SelectionGranularity) -> Self {
        Self {
            granularity,
            ..self
        }
    }

    #[must_use]
    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Clamps `instant` into `[start, end]`.
    #[must_use]
    pub fn clamp(self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant.clamp(self.start, self.end)
    }

    /// Midpoint snapped to the axis granularity.
    #[must_use]
    pub fn midpoint(self) -> DateTime<Utc> {
        crate::core::position_mapper::instant_from_percent(50.0, self)
    }

    pub(crate) fn start_millis(self) -> i64 {
        self.start.timestamp_millis()
    }

    pub(crate) fn end_millis(self) -> i64 {
        self.end.timestamp_millis()
    }

    pub(crate) fn span_millis(self) -> i64 {
        self.end_millis() - self.start_millis()
    }

    pub(crate) fn instant_at_millis(self, millis: i64) -> DateTime<Utc> {
        let clamped = millis.clamp(self.start_millis(), self.end_millis());
        datetime_from_millis(clamped).unwrap_or(self.start)
    }
}
