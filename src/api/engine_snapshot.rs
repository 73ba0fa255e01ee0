use serde::{Deserialize, Serialize};

use crate::core::{DisplayUnit, HandleState, Scale, SelectionResult, SelectionTopology, TimeAxis};
use crate::error::SliderResult;
use crate::interaction::{FocusTarget, GestureState, ScrollViewport};

use super::{RangeGap, SliderEngine};

/// Serializable deterministic state snapshot used by renderers, regression
/// tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSnapshot {
    pub topology: SelectionTopology,
    pub axis: TimeAxis,
    pub display_unit: DisplayUnit,
    pub handles: Vec<HandleState>,
    pub current: SelectionResult,
    pub committed: Option<SelectionResult>,
    pub range_gap: RangeGap,
    pub min_gap_percent: f64,
    pub scales: Vec<Scale>,
    pub focused: Option<FocusTarget>,
    pub gesture: GestureState,
    pub scroll: ScrollViewport,
    pub listener_ids: Vec<String>,
}

impl SliderEngine {
    #[must_use]
    pub fn snapshot(&self) -> SliderSnapshot {
        SliderSnapshot {
            topology: self.selection.topology(),
            axis: self.selection.axis(),
            display_unit: self.display_unit,
            handles: self.handles(),
            current: self.selection.current_result(),
            committed: self.selection.committed(),
            range_gap: self.selection.gap(),
            min_gap_percent: self.min_gap_percent(),
            scales: self.scale_cache.scales().to_vec(),
            focused: self.focus.focused(),
            gesture: self.gesture_state(),
            scroll: self.auto_scroll.viewport(),
            listener_ids: self.listeners.keys().cloned().collect(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> SliderResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
