//! time-slider-rs: interaction engine for UTC date/time sliders.
//!
//! The crate maps track percentages to calendar instants, keeps one, two or
//! three handles consistent under pointer, touch, keyboard and imperative
//! input, and emits the committed selection. Rendering is left to the host,
//! which receives percentages and tick marks to place.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{SliderConfig, SliderEngine};
pub use error::{SliderError, SliderResult};
