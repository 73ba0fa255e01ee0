pub mod calendar;
pub mod position_mapper;
pub mod scale;
pub mod time_axis;
pub mod types;

pub use calendar::{DisplayUnit, SelectionGranularity};
pub use position_mapper::{
    SnapDirection, clamp_percent, instant_from_percent, instant_from_percent_snapped,
    percent_from_instant, snap_percent,
};
pub use scale::{
    Scale, ScaleRequest, TickClassification, generate_scales, unit_boundaries, unit_width_percent,
};
pub use time_axis::TimeAxis;
pub use types::{DateRange, HandleId, HandleState, SelectionResult, SelectionTopology};
