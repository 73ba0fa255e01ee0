//! Pure conversions between axis percentage and UTC instants.
//!
//! Percentages live in `[0, 100]`. Every instant produced here lies inside the
//! axis and, whenever the axis holds a granularity boundary near the target,
//! on that boundary.

use chrono::{DateTime, Utc};

use crate::core::calendar::{ceil_to_step, floor_to_step, round_to_step};
use crate::core::time_axis::TimeAxis;

pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

/// Direction used when an interpolated instant falls between two granularity
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapDirection {
    /// Nearest boundary, ties go to the later one.
    Nearest,
    /// Boundary at or before the interpolated instant.
    Earlier,
    /// Boundary at or after the interpolated instant.
    Later,
}

/// Clamps to `[0, 100]`; non-finite input collapses to `0`.
#[must_use]
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return PERCENT_MIN;
    }
    percent.clamp(PERCENT_MIN, PERCENT_MAX)
}

/// Maps an axis percentage to the nearest granularity-aligned instant.
#[must_use]
pub fn instant_from_percent(percent: f64, axis: TimeAxis) -> DateTime<Utc> {
    instant_from_percent_snapped(percent, axis, SnapDirection::Nearest)
}

/// Maps an instant to its axis percentage after clamping it into the axis.
#[must_use]
pub fn percent_from_instant(instant: DateTime<Utc>, axis: TimeAxis) -> f64 {
    let millis = axis.clamp(instant).timestamp_millis();
    let offset = (millis - axis.start_millis()) as f64;
    clamp_percent(offset / axis.span_millis() as f64 * PERCENT_MAX)
}

/// Same as [`instant_from_percent`] with an explicit snapping direction.
#[must_use]
pub fn instant_from_percent_snapped(
    percent: f64,
    axis: TimeAxis,
    direction: SnapDirection,
) -> DateTime<Utc> {
    let start = axis.start_millis();
    let end = axis.end_millis();
    let raw = start as f64 + axis.span_millis() as f64 * clamp_percent(percent) / PERCENT_MAX;
    let raw_millis = match direction {
        SnapDirection::Nearest => raw.round(),
        SnapDirection::Earlier => raw.floor(),
        SnapDirection::Later => raw.ceil(),
    } as i64;

    let step = axis.granularity().step_millis();
    let mut snapped = match direction {
        SnapDirection::Nearest => round_to_step(raw_millis, step),
        SnapDirection::Earlier => floor_to_step(raw_millis, step),
        SnapDirection::Later => ceil_to_step(raw_millis, step),
    };
    if snapped < start {
        snapped = ceil_to_step(start, step);
    }
    if snapped > end {
        snapped = floor_to_step(end, step);
    }
    if snapped < start || snapped > end {
        // No boundary inside the axis at all.
        snapped = raw_millis;
    }
    axis.instant_at_millis(snapped)
}

/// Re-derives the percentage of the snapped instant under `percent`.
#[must_use]
pub fn snap_percent(percent: f64, axis: TimeAxis, direction: SnapDirection) -> f64 {
    percent_from_instant(instant_from_percent_snapped(percent, axis, direction), axis)
}
