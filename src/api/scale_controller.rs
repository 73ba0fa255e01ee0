use tracing::{debug, trace};

use crate::core::position_mapper::PERCENT_MAX;
use crate::core::{DisplayUnit, Scale, ScaleRequest, TimeAxis, generate_scales, unit_width_percent};
use crate::error::{SliderError, SliderResult};
use crate::extensions::SliderEvent;

use super::validation::validate_runtime_width;
use super::{RangeGap, SliderConfig, SliderEngine};

/// Last generated scale set, keyed by the request that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct ScaleCache {
    request: Option<ScaleRequest>,
    scales: Vec<Scale>,
    unit_width_percent: f64,
    generation: u64,
}

impl ScaleCache {
    /// Regenerates unless the request matches the cached one. Returns `true`
    /// when the scales were rebuilt.
    pub(super) fn refresh(&mut self, config: &SliderConfig, axis: TimeAxis, unit: DisplayUnit) -> bool {
        let request = ScaleRequest {
            axis,
            unit,
            width_px: config.container_width_px,
            min_tick_gap_px: config.min_tick_gap_px,
            mid_unit_markers: config.mid_unit_markers,
        };
        if self.request == Some(request) {
            trace!("scale cache hit");
            return false;
        }

        let unit_changed = self
            .request
            .is_none_or(|previous| previous.axis != axis || previous.unit != unit);
        if unit_changed {
            self.unit_width_percent = unit_width_percent(axis, unit);
        }
        self.scales = generate_scales(request);
        self.request = Some(request);
        self.generation += 1;
        debug!(
            count = self.scales.len(),
            unit = ?unit,
            width_px = request.width_px,
            generation = self.generation,
            "regenerated scales"
        );
        true
    }

    pub(super) fn scales(&self) -> &[Scale] {
        &self.scales
    }

    pub(super) fn unit_width_percent(&self) -> f64 {
        self.unit_width_percent
    }

    pub(super) fn generation(&self) -> u64 {
        self.generation
    }

    pub(super) fn min_gap_percent(&self, min_gap_scale_units: u32) -> f64 {
        (f64::from(min_gap_scale_units) * self.unit_width_percent).min(PERCENT_MAX)
    }
}

impl SliderEngine {
    /// Tick marks for the current axis, display unit and container width.
    #[must_use]
    pub fn scales(&self) -> &[Scale] {
        self.scale_cache.scales()
    }

    /// Percent width of one display-unit tick on the current axis.
    #[must_use]
    pub fn unit_width_percent(&self) -> f64 {
        self.scale_cache.unit_width_percent()
    }

    /// Number of times scales were actually rebuilt.
    #[must_use]
    pub fn scale_generation(&self) -> u64 {
        self.scale_cache.generation()
    }

    /// Resize callback. Updates track geometry, viewport and scales; handle
    /// positions are percentages and stay put.
    pub fn set_container_width(&mut self, width_px: f64) -> SliderResult<()> {
        validate_runtime_width(width_px, "container width")?;
        let viewport_width = self.config.viewport_width_px.unwrap_or(width_px);
        self.config.container_width_px = width_px;
        self.track.width_px = width_px;
        self.auto_scroll.resize(width_px, viewport_width);
        self.refresh_scales();
        Ok(())
    }

    /// Sets the visible width of the scroll container around the track.
    pub fn set_viewport_width(&mut self, width_px: f64) -> SliderResult<()> {
        validate_runtime_width(width_px, "viewport width")?;
        self.config.viewport_width_px = Some(width_px);
        self.auto_scroll
            .resize(self.config.container_width_px, width_px);
        self.reveal_active_handle();
        Ok(())
    }

    /// Records the client-x of the track's left edge (unscrolled).
    pub fn set_track_left(&mut self, left_px: f64) -> SliderResult<()> {
        if !left_px.is_finite() {
            return Err(SliderError::InvalidData(format!(
                "track left must be finite, got {left_px}"
            )));
        }
        self.config.track_left_px = left_px;
        self.track.left_px = left_px;
        Ok(())
    }

    pub fn set_min_tick_gap_px(&mut self, gap_px: f64) {
        if gap_px.is_finite() && gap_px >= 0.0 {
            self.config.min_tick_gap_px = gap_px;
            self.refresh_scales();
        }
    }

    /// Switches the tick unit. The range gap is re-counted in the new unit and
    /// the endpoints are pushed apart, and committed, when needed. An active
    /// drag is canceled first.
    pub fn set_display_unit(&mut self, unit: DisplayUnit) {
        if unit == self.display_unit {
            return;
        }
        self.cancel_gesture();
        self.display_unit = unit;
        self.config.display_unit = unit;
        self.refresh_scales();
        self.apply_range_gap();
    }

    /// Changes the range gap. Endpoints pushed apart by a larger gap are
    /// committed and emitted like any other move.
    pub fn set_min_gap_scale_units(&mut self, units: u32) {
        self.config.min_gap_scale_units = units;
        self.apply_range_gap();
    }

    fn apply_range_gap(&mut self) {
        let gap = RangeGap::new(self.config.min_gap_scale_units, self.display_unit);
        if self.selection.set_gap(gap) {
            debug!(?gap, "range endpoints pushed apart, committing");
            self.commit();
        }
    }

    pub(super) fn refresh_scales(&mut self) {
        let axis = self.selection.axis();
        if self.scale_cache.refresh(&self.config, axis, self.display_unit) {
            let count = self.scale_cache.scales().len();
            self.emit_event(SliderEvent::ScalesRegenerated { count });
        }
    }
}
