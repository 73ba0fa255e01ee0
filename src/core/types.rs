use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which handles a slider instance has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionTopology {
    #[default]
    Point,
    Range,
    Combined,
}

impl SelectionTopology {
    /// Handles present in this topology, in tab order.
    #[must_use]
    pub fn handles(self) -> &'static [HandleId] {
        match self {
            Self::Point => &[HandleId::Point],
            Self::Range => &[HandleId::Start, HandleId::End],
            Self::Combined => &[HandleId::Start, HandleId::End, HandleId::Point],
        }
    }

    #[must_use]
    pub fn has_handle(self, handle: HandleId) -> bool {
        self.handles().contains(&handle)
    }

    /// Handle targeted by imperative calls that omit one.
    #[must_use]
    pub fn primary_handle(self) -> HandleId {
        match self {
            Self::Point | Self::Combined => HandleId::Point,
            Self::Range => HandleId::Start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleId {
    Start,
    End,
    Point,
}

/// Position and interaction flags of one handle. `position` is in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleState {
    pub id: HandleId,
    pub position: f64,
    pub dragging: bool,
    pub focused: bool,
}

impl HandleState {
    #[must_use]
    pub fn new(id: HandleId, position: f64) -> Self {
        Self {
            id,
            position,
            dragging: false,
            focused: false,
        }
    }
}

/// Closed UTC interval with `start <= end`.
///
/// Deserialization goes through [`DateRange::new`], so reversed bounds in
/// JSON are swapped as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "DateRangeBounds")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct DateRangeBounds {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl From<DateRangeBounds> for DateRange {
    fn from(bounds: DateRangeBounds) -> Self {
        Self::new(bounds.start, bounds.end)
    }
}

impl DateRange {
    /// Builds a range, swapping the bounds when they arrive reversed.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }
}

/// Value emitted on every commit, shaped by the active topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionResult {
    Point {
        point: DateTime<Utc>,
    },
    Range {
        range: DateRange,
    },
    Combined {
        point: DateTime<Utc>,
        range: DateRange,
    },
}

impl SelectionResult {
    #[must_use]
    pub fn point(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Point { point } | Self::Combined { point, .. } => Some(*point),
            Self::Range { .. } => None,
        }
    }

    #[must_use]
    pub fn range(&self) -> Option<DateRange> {
        match self {
            Self::Range { range } | Self::Combined { range, .. } => Some(*range),
            Self::Point { .. } => None,
        }
    }

    #[must_use]
    pub fn topology(&self) -> SelectionTopology {
        match self {
            Self::Point { .. } => SelectionTopology::Point,
            Self::Range { .. } => SelectionTopology::Range,
            Self::Combined { .. } => SelectionTopology::Combined,
        }
    }
}
