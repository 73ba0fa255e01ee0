use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::calendar::DisplayUnit;
use crate::core::position_mapper::{PERCENT_MAX, percent_from_instant};
use crate::core::time_axis::TimeAxis;

/// Visual weight of a tick mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickClassification {
    Short,
    Medium,
    Long,
}

/// One tick mark on the slider track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub position: f64,
    pub classification: TickClassification,
    pub instant: DateTime<Utc>,
    pub label: String,
}

/// Inputs to [`generate_scales`]. Also the memoization key for callers that
/// cache the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRequest {
    pub axis: TimeAxis,
    pub unit: DisplayUnit,
    pub width_px: f64,
    pub min_tick_gap_px: f64,
    pub mid_unit_markers: bool,
}

/// Every `unit` boundary inside `[axis.start, axis.end]`, ascending.
#[must_use]
pub fn unit_boundaries(axis: TimeAxis, unit: DisplayUnit) -> Vec<DateTime<Utc>> {
    let first = unit.ceil(axis.start());
    let mut boundaries = Vec::new();
    let mut cursor = first;
    let mut step = 0;
    while cursor <= axis.end() {
        boundaries.push(cursor);
        step += 1;
        // Stepping from the first boundary keeps month ends from drifting.
        match unit.add(first, step) {
            Some(next) if next > cursor => cursor = next,
            _ => break,
        }
    }
    boundaries
}

/// Percent width of one `unit` on this axis.
///
/// Averaged over the boundaries the axis actually contains so that calendar
/// months of different lengths share one width.
#[must_use]
pub fn unit_width_percent(axis: TimeAxis, unit: DisplayUnit) -> f64 {
    let boundaries = unit_boundaries(axis, unit);
    match (boundaries.first(), boundaries.last()) {
        (Some(first), Some(last)) if boundaries.len() >= 2 => {
            let spread = percent_from_instant(*last, axis) - percent_from_instant(*first, axis);
            spread / (boundaries.len() - 1) as f64
        }
        _ => unit.nominal_millis() / axis.span_millis() as f64 * PERCENT_MAX,
    }
}

/// Builds the ordered tick sequence for a track `width_px` wide.
///
/// The axis start and end always produce ticks, even when they are not unit
/// boundaries. Ticks closer than `min_tick_gap_px` are thinned with `Long`
/// ticks taking priority.
#[must_use]
pub fn generate_scales(request: ScaleRequest) -> Vec<Scale> {
    let ScaleRequest {
        axis,
        unit,
        width_px,
        min_tick_gap_px,
        mid_unit_markers,
    } = request;

    let mut instants = unit_boundaries(axis, unit);
    if instants.first() != Some(&axis.start()) {
        instants.insert(0, axis.start());
    }
    if instants.last() != Some(&axis.end()) {
        instants.push(axis.end());
    }

    let candidates: Vec<(Scale, f64, bool)> = instants
        .into_iter()
        .map(|instant| {
            let classification = if unit.is_major_boundary(instant) {
                TickClassification::Long
            } else if mid_unit_markers && unit.is_mid_boundary(instant) {
                TickClassification::Medium
            } else {
                TickClassification::Short
            };
            let position = percent_from_instant(instant, axis);
            let scale = Scale {
                position,
                classification,
                instant,
                label: unit.label(instant, classification == TickClassification::Long),
            };
            let x_px = position / PERCENT_MAX * width_px.max(0.0);
            (scale, x_px, classification == TickClassification::Long)
        })
        .collect();

    select_with_min_spacing_prioritized(candidates, min_tick_gap_px)
        .into_iter()
        .map(|(scale, _, _)| scale)
        .collect()
}

/// Drops items closer than `min_spacing_px` to their predecessor. A major item
/// colliding with a minor one replaces it; the last item is kept when it fits.
fn select_with_min_spacing_prioritized<T: Clone>(
    items: Vec<(T, f64, bool)>,
    min_spacing_px: f64,
) -> Vec<(T, f64, bool)> {
    if items.len() <= 1 || !min_spacing_px.is_finite() || min_spacing_px <= 0.0 {
        return items;
    }

    let mut selected: Vec<(T, f64, bool)> = Vec::with_capacity(items.len());
    for item in items.iter().cloned() {
        let Some(last) = selected.last() else {
            selected.push(item);
            continue;
        };
        if item.1 - last.1 >= min_spacing_px {
            selected.push(item);
            continue;
        }
        if item.2 && !last.2 {
            let previous_fits = selected.len() < 2
                || item.1 - selected[selected.len() - 2].1 >= min_spacing_px;
            if previous_fits {
                let last_index = selected.len() - 1;
                selected[last_index] = item;
            }
        }
    }

    if let (Some(tail), Some(kept)) = (items.last(), selected.last()) {
        let count = selected.len();
        if tail.1 != kept.1 && !kept.2 && count >= 2 {
            if tail.1 - selected[count - 2].1 >= min_spacing_px {
                selected[count - 1] = tail.clone();
            }
        }
    }

    selected
}
