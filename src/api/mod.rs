mod drag_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod frame_controller;
mod imperative_controller;
mod keyboard_controller;
mod listener_registry;
mod scale_controller;
mod selection_state;
mod validation;

pub use engine::SliderEngine;
pub use engine_config::{DragEmission, InitialSelection, SliderConfig};
pub use engine_snapshot::SliderSnapshot;
pub use selection_state::{PERCENT_EPSILON, RangeGap, SelectionStateMachine};
