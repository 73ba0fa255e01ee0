use crate::core::TimeAxis;
use crate::error::{SliderError, SliderResult};
use crate::interaction::AutoScrollBehavior;

use super::SliderConfig;

pub(super) fn validate_config(config: &SliderConfig) -> SliderResult<TimeAxis> {
    let axis = TimeAxis::new(config.axis_start, config.axis_end, config.granularity)?;
    validate_width(config.container_width_px, "container width")?;
    validate_width(config.viewport_width_or_container(), "viewport width")?;
    if !config.track_left_px.is_finite() {
        return Err(SliderError::InvalidConfig(
            "track left must be finite".to_owned(),
        ));
    }
    validate_non_negative(config.min_tick_gap_px, "min tick gap")?;
    validate_non_negative(config.click_slop_px, "click slop")?;
    validate_non_negative(config.handle_hit_radius_px, "handle hit radius")?;
    validate_auto_scroll_behavior(config.auto_scroll)?;
    Ok(axis)
}

pub(super) fn validate_width(width_px: f64, name: &str) -> SliderResult<f64> {
    if !width_px.is_finite() || width_px <= 0.0 {
        return Err(SliderError::InvalidConfig(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(width_px)
}

/// Geometry reported by the host after construction.
pub(super) fn validate_runtime_width(width_px: f64, name: &str) -> SliderResult<f64> {
    validate_width(width_px, name)
        .map_err(|_| SliderError::InvalidData(format!("{name} must be finite and > 0, got {width_px}")))
}

pub(super) fn validate_auto_scroll_behavior(
    behavior: AutoScrollBehavior,
) -> SliderResult<AutoScrollBehavior> {
    validate_non_negative(behavior.edge_threshold_px, "auto-scroll edge threshold")?;
    validate_non_negative(behavior.step_px, "auto-scroll step")?;
    Ok(behavior)
}

fn validate_non_negative(value: f64, name: &str) -> SliderResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(SliderError::InvalidConfig(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(value)
}
