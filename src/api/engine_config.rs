use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DateRange, DisplayUnit, SelectionGranularity, SelectionTopology};
use crate::error::SliderResult;
use crate::interaction::AutoScrollBehavior;

/// When a pointer drag emits selection results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DragEmission {
    /// One emission when the gesture ends.
    #[default]
    OnRelease,
    /// An emission for every pointer move that changed the handle, plus the
    /// one at release.
    OnMove,
}

/// Initial handle values. Values the topology has no handle for are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InitialSelection {
    pub point: Option<DateTime<Utc>>,
    pub range: Option<DateRange>,
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep slider setups in JSON next to the rest of
/// their UI configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(default)]
    pub topology: SelectionTopology,
    pub axis_start: DateTime<Utc>,
    pub axis_end: DateTime<Utc>,
    #[serde(default)]
    pub granularity: SelectionGranularity,
    #[serde(default)]
    pub display_unit: DisplayUnit,
    /// Minimum distance between range endpoints, in display-unit ticks.
    #[serde(default)]
    pub min_gap_scale_units: u32,
    #[serde(default)]
    pub free_selection_on_track_click: bool,
    #[serde(default)]
    pub initial: InitialSelection,
    #[serde(default = "default_container_width_px")]
    pub container_width_px: f64,
    /// Visible width of the scroll container; defaults to the track width.
    #[serde(default)]
    pub viewport_width_px: Option<f64>,
    #[serde(default)]
    pub track_left_px: f64,
    #[serde(default = "default_min_tick_gap_px")]
    pub min_tick_gap_px: f64,
    #[serde(default)]
    pub mid_unit_markers: bool,
    #[serde(default)]
    pub drag_emission: DragEmission,
    #[serde(default)]
    pub display_unit_control: bool,
    #[serde(default)]
    pub auto_scroll: AutoScrollBehavior,
    #[serde(default = "default_click_slop_px")]
    pub click_slop_px: f64,
    #[serde(default = "default_handle_hit_radius_px")]
    pub handle_hit_radius_px: f64,
}

impl SliderConfig {
    /// Creates a point slider over `[axis_start, axis_end]` with defaults for
    /// everything else.
    #[must_use]
    pub fn new(axis_start: DateTime<Utc>, axis_end: DateTime<Utc>) -> Self {
        Self {
            topology: SelectionTopology::default(),
            axis_start,
            axis_end,
            granularity: SelectionGranularity::default(),
            display_unit: DisplayUnit::default(),
            min_gap_scale_units: 0,
            free_selection_on_track_click: false,
            initial: InitialSelection::default(),
            container_width_px: default_container_width_px(),
            viewport_width_px: None,
            track_left_px: 0.0,
            min_tick_gap_px: default_min_tick_gap_px(),
            mid_unit_markers: false,
            drag_emission: DragEmission::default(),
            display_unit_control: false,
            auto_scroll: AutoScrollBehavior::default(),
            click_slop_px: default_click_slop_px(),
            handle_hit_radius_px: default_handle_hit_radius_px(),
        }
    }

    #[must_use]
    pub fn with_topology(mut self, topology: SelectionTopology) -> Self {
        self.topology = topology;
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: SelectionGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    #[must_use]
    pub fn with_display_unit(mut self, display_unit: DisplayUnit) -> Self {
        self.display_unit = display_unit;
        self
    }

    #[must_use]
    pub fn with_min_gap_scale_units(mut self, units: u32) -> Self {
        self.min_gap_scale_units = units;
        self
    }

    #[must_use]
    pub fn with_free_selection_on_track_click(mut self, enabled: bool) -> Self {
        self.free_selection_on_track_click = enabled;
        self
    }

    #[must_use]
    pub fn with_initial_point(mut self, point: DateTime<Utc>) -> Self {
        self.initial.point = Some(point);
        self
    }

    #[must_use]
    pub fn with_initial_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.initial.range = Some(DateRange::new(start, end));
        self
    }

    /// Sets the track width and, unless given separately, the viewport width.
    #[must_use]
    pub fn with_container_width_px(mut self, width_px: f64) -> Self {
        self.container_width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_viewport_width_px(mut self, width_px: f64) -> Self {
        self.viewport_width_px = Some(width_px);
        self
    }

    #[must_use]
    pub fn with_track_left_px(mut self, left_px: f64) -> Self {
        self.track_left_px = left_px;
        self
    }

    #[must_use]
    pub fn with_min_tick_gap_px(mut self, gap_px: f64) -> Self {
        self.min_tick_gap_px = gap_px;
        self
    }

    #[must_use]
    pub fn with_mid_unit_markers(mut self, enabled: bool) -> Self {
        self.mid_unit_markers = enabled;
        self
    }

    #[must_use]
    pub fn with_drag_emission(mut self, emission: DragEmission) -> Self {
        self.drag_emission = emission;
        self
    }

    #[must_use]
    pub fn with_display_unit_control(mut self, enabled: bool) -> Self {
        self.display_unit_control = enabled;
        self
    }

    #[must_use]
    pub fn with_auto_scroll(mut self, behavior: AutoScrollBehavior) -> Self {
        self.auto_scroll = behavior;
        self
    }

    #[must_use]
    pub fn with_click_slop_px(mut self, slop_px: f64) -> Self {
        self.click_slop_px = slop_px;
        self
    }

    #[must_use]
    pub fn with_handle_hit_radius_px(mut self, radius_px: f64) -> Self {
        self.handle_hit_radius_px = radius_px;
        self
    }

    #[must_use]
    pub fn viewport_width_or_container(&self) -> f64 {
        self.viewport_width_px.unwrap_or(self.container_width_px)
    }

    pub fn from_json_str(input: &str) -> SliderResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> SliderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_container_width_px() -> f64 {
    800.0
}

fn default_min_tick_gap_px() -> f64 {
    8.0
}

fn default_click_slop_px() -> f64 {
    4.0
}

fn default_handle_hit_radius_px() -> f64 {
    12.0
}
