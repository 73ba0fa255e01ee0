use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::position_mapper::{PERCENT_MAX, PERCENT_MIN};
use crate::core::{
    DateRange, DisplayUnit, HandleId, HandleState, SelectionResult, SelectionTopology,
    SnapDirection, TimeAxis, clamp_percent, instant_from_percent, percent_from_instant,
    snap_percent,
};

use super::InitialSelection;

/// Slack for float noise when comparing snapped positions against limits.
pub const PERCENT_EPSILON: f64 = 1e-9;

/// Minimum distance between range endpoints, counted in display-unit ticks.
///
/// The distance is calendar based: with three `Month` units a range ending
/// on Dec 1 may start no later than Sep 1, whatever the month lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeGap {
    pub units: u32,
    pub unit: DisplayUnit,
}

impl RangeGap {
    #[must_use]
    pub fn new(units: u32, unit: DisplayUnit) -> Self {
        Self { units, unit }
    }

    /// Earliest end allowed for a range starting at `start`.
    #[must_use]
    pub fn end_floor(self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let units = i32::try_from(self.units).ok()?;
        self.unit.add(start, units)
    }

    /// Latest start allowed for a range ending at `end`.
    #[must_use]
    pub fn start_ceiling(self, end: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let units = i32::try_from(self.units).ok()?;
        self.unit.add(end, -units)
    }

    #[must_use]
    pub fn holds(self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.end_floor(start).is_some_and(|floor| floor <= end)
    }
}

/// Handles that exist for each topology. Absent handles are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Handles {
    Point {
        point: HandleState,
    },
    Range {
        start: HandleState,
        end: HandleState,
    },
    Combined {
        start: HandleState,
        end: HandleState,
        point: HandleState,
    },
}

impl Handles {
    fn get(&self, id: HandleId) -> Option<&HandleState> {
        match (self, id) {
            (Self::Point { point }, HandleId::Point)
            | (Self::Combined { point, .. }, HandleId::Point) => Some(point),
            (Self::Range { start, .. }, HandleId::Start)
            | (Self::Combined { start, .. }, HandleId::Start) => Some(start),
            (Self::Range { end, .. }, HandleId::End)
            | (Self::Combined { end, .. }, HandleId::End) => Some(end),
            _ => None,
        }
    }

    fn get_mut(&mut self, id: HandleId) -> Option<&mut HandleState> {
        match (self, id) {
            (Self::Point { point }, HandleId::Point)
            | (Self::Combined { point, .. }, HandleId::Point) => Some(point),
            (Self::Range { start, .. }, HandleId::Start)
            | (Self::Combined { start, .. }, HandleId::Start) => Some(start),
            (Self::Range { end, .. }, HandleId::End)
            | (Self::Combined { end, .. }, HandleId::End) => Some(end),
            _ => None,
        }
    }

    fn range_positions(&self) -> Option<(f64, f64)> {
        match self {
            Self::Range { start, end } | Self::Combined { start, end, .. } => {
                Some((start.position, end.position))
            }
            Self::Point { .. } => None,
        }
    }
}

/// Logical selection of one slider instance.
///
/// `propose_move` is the only way handle positions change. In range
/// topologies it keeps `end` at least `gap` display units after `start`,
/// stopping a handle at that limit rather than letting it jump past.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionStateMachine {
    axis: TimeAxis,
    handles: Handles,
    gap: RangeGap,
    committed: Option<SelectionResult>,
}

impl SelectionStateMachine {
    #[must_use]
    pub fn new(
        axis: TimeAxis,
        topology: SelectionTopology,
        initial: InitialSelection,
        gap: RangeGap,
    ) -> Self {
        let point_percent = || {
            initial
                .point
                .map_or(50.0, |point| percent_from_instant(point, axis))
        };
        let range_percents = || {
            initial.range.map_or((PERCENT_MIN, PERCENT_MAX), |range| {
                let range = DateRange::new(range.start, range.end);
                (
                    percent_from_instant(range.start, axis),
                    percent_from_instant(range.end, axis),
                )
            })
        };
        let snapped = |id: HandleId, percent: f64| {
            HandleState::new(id, snap_percent(percent, axis, SnapDirection::Nearest))
        };

        let handles = match topology {
            SelectionTopology::Point => Handles::Point {
                point: snapped(HandleId::Point, point_percent()),
            },
            SelectionTopology::Range => {
                let (start, end) = range_percents();
                Handles::Range {
                    start: snapped(HandleId::Start, start),
                    end: snapped(HandleId::End, end),
                }
            }
            SelectionTopology::Combined => {
                let (start, end) = range_percents();
                Handles::Combined {
                    start: snapped(HandleId::Start, start),
                    end: snapped(HandleId::End, end),
                    point: snapped(HandleId::Point, point_percent()),
                }
            }
        };

        let mut machine = Self {
            axis,
            handles,
            gap: RangeGap::default(),
            committed: None,
        };
        machine.set_gap(gap);
        machine
    }

    #[must_use]
    pub fn axis(&self) -> TimeAxis {
        self.axis
    }

    #[must_use]
    pub fn topology(&self) -> SelectionTopology {
        match self.handles {
            Handles::Point { .. } => SelectionTopology::Point,
            Handles::Range { .. } => SelectionTopology::Range,
            Handles::Combined { .. } => SelectionTopology::Combined,
        }
    }

    #[must_use]
    pub fn gap(&self) -> RangeGap {
        self.gap
    }

    /// Replaces the range gap and pushes the endpoints apart if they now sit
    /// too close: `end` moves first, `start` only once `end` hits the axis
    /// end. Returns `true` when a handle moved.
    pub fn set_gap(&mut self, gap: RangeGap) -> bool {
        self.gap = gap;
        let Some((start, end)) = self.handles.range_positions() else {
            return false;
        };
        let start_instant = instant_from_percent(start, self.axis);
        if gap.holds(start_instant, instant_from_percent(end, self.axis)) {
            return false;
        }

        let end_fits = gap
            .end_floor(start_instant)
            .is_some_and(|floor| floor <= self.axis.end());
        let (new_start, new_end) = if end_fits {
            let floor = self.end_floor_percent(start);
            (start, self.snap_at_least(floor, floor))
        } else {
            let new_end = self.snap_at_most(PERCENT_MAX, PERCENT_MAX);
            let ceiling = self.start_ceiling_percent(new_end);
            (self.snap_at_most(ceiling, ceiling), new_end)
        };
        trace!(?gap, new_start, new_end, "pushed range apart for gap");
        self.set_position(HandleId::Start, new_start);
        self.set_position(HandleId::End, new_end);
        new_start != start || new_end != end
    }

    #[must_use]
    pub fn handle(&self, id: HandleId) -> Option<HandleState> {
        self.handles.get(id).copied()
    }

    /// Present handles in tab order.
    #[must_use]
    pub fn handles(&self) -> SmallVec<[HandleState; 3]> {
        self.topology()
            .handles()
            .iter()
            .filter_map(|id| self.handle(*id))
            .collect()
    }

    #[must_use]
    pub fn instant_of(&self, id: HandleId) -> Option<DateTime<Utc>> {
        self.handle(id)
            .map(|handle| instant_from_percent(handle.position, self.axis))
    }

    /// Handle closest to `percent`. Ties go to the earlier handle in tab order.
    #[must_use]
    pub fn nearest_handle(&self, percent: f64) -> HandleId {
        self.handles()
            .into_iter()
            .min_by_key(|handle| OrderedFloat((handle.position - percent).abs()))
            .map_or(self.topology().primary_handle(), |handle| handle.id)
    }

    /// Moves `id` towards `candidate_percent`, snapped to the axis granularity
    /// and clamped by the range ordering and gap.
    ///
    /// Returns the resulting position, or `None` when the topology has no such
    /// handle.
    pub fn propose_move(&mut self, id: HandleId, candidate_percent: f64) -> Option<f64> {
        self.handles.get(id)?;
        let candidate = clamp_percent(candidate_percent);

        let position = match (id, self.handles.range_positions()) {
            (HandleId::Start, Some((_, end))) => {
                self.snap_at_most(candidate, self.start_ceiling_percent(end))
            }
            (HandleId::End, Some((start, _))) => {
                self.snap_at_least(candidate, self.end_floor_percent(start))
            }
            _ => snap_percent(candidate, self.axis, SnapDirection::Nearest),
        };

        trace!(
            handle = ?id,
            candidate = candidate_percent,
            position,
            "propose handle move"
        );
        self.set_position(id, position);
        Some(position)
    }

    /// Marks the current handles as the externally visible result.
    pub fn commit(&mut self) -> SelectionResult {
        let result = self.current_result();
        self.committed = Some(result);
        result
    }

    #[must_use]
    pub fn committed(&self) -> Option<SelectionResult> {
        self.committed
    }

    #[must_use]
    pub fn current_result(&self) -> SelectionResult {
        let instant = |handle: &HandleState| instant_from_percent(handle.position, self.axis);
        match &self.handles {
            Handles::Point { point } => SelectionResult::Point {
                point: instant(point),
            },
            Handles::Range { start, end } => SelectionResult::Range {
                range: DateRange::new(instant(start), instant(end)),
            },
            Handles::Combined { start, end, point } => SelectionResult::Combined {
                point: instant(point),
                range: DateRange::new(instant(start), instant(end)),
            },
        }
    }

    pub fn set_dragging(&mut self, dragging: Option<HandleId>) {
        for id in self.topology().handles() {
            if let Some(handle) = self.handles.get_mut(*id) {
                handle.dragging = dragging == Some(*id);
            }
        }
    }

    pub fn set_focused(&mut self, focused: Option<HandleId>) {
        for id in self.topology().handles() {
            if let Some(handle) = self.handles.get_mut(*id) {
                handle.focused = focused == Some(*id);
            }
        }
    }

    fn set_position(&mut self, id: HandleId, position: f64) {
        if let Some(handle) = self.handles.get_mut(id) {
            handle.position = position;
        }
    }

    fn start_ceiling_percent(&self, end_percent: f64) -> f64 {
        let end = instant_from_percent(end_percent, self.axis);
        self.gap
            .start_ceiling(end)
            .map_or(PERCENT_MIN, |limit| percent_from_instant(limit, self.axis))
    }

    fn end_floor_percent(&self, start_percent: f64) -> f64 {
        let start = instant_from_percent(start_percent, self.axis);
        self.gap
            .end_floor(start)
            .map_or(PERCENT_MAX, |limit| percent_from_instant(limit, self.axis))
    }

    /// Nearest aligned position to `percent` that does not exceed `ceiling`.
    fn snap_at_most(&self, percent: f64, ceiling: f64) -> f64 {
        let ceiling = ceiling.max(PERCENT_MIN);
        let nearest = snap_percent(percent.min(ceiling), self.axis, SnapDirection::Nearest);
        if nearest <= ceiling + PERCENT_EPSILON {
            return nearest;
        }
        let earlier = snap_percent(ceiling, self.axis, SnapDirection::Earlier);
        if earlier <= ceiling + PERCENT_EPSILON {
            earlier
        } else {
            clamp_percent(ceiling)
        }
    }

    /// Nearest aligned position to `percent` that is not below `floor`.
    fn snap_at_least(&self, percent: f64, floor: f64) -> f64 {
        let floor = floor.min(PERCENT_MAX);
        let nearest = snap_percent(percent.max(floor), self.axis, SnapDirection::Nearest);
        if nearest >= floor - PERCENT_EPSILON {
            return nearest;
        }
        let later = snap_percent(floor, self.axis, SnapDirection::Later);
        if later >= floor - PERCENT_EPSILON {
            later
        } else {
            clamp_percent(floor)
        }
    }
}
