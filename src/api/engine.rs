use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    DisplayUnit, HandleId, HandleState, SelectionGranularity, SelectionResult,
    SelectionTopology, TimeAxis,
};
use crate::error::SliderResult;
use crate::extensions::{SelectionListener, SliderCommands, SliderEvent};
use crate::interaction::{
    AutoScrollController, DragSession, FocusManager, FocusTarget, TrackGeometry, TrackPress,
};

use super::scale_controller::ScaleCache;
use super::validation::validate_config;
use super::{InitialSelection, RangeGap, SelectionStateMachine, SliderConfig};

/// Main facade consumed by host applications.
///
/// One engine owns the whole state of one slider: the selection state
/// machine, the current drag session, focus, scroll and cached scales.
/// Nothing is shared between engines.
pub struct SliderEngine {
    pub(super) config: SliderConfig,
    pub(super) selection: SelectionStateMachine,
    pub(super) display_unit: DisplayUnit,
    pub(super) track: TrackGeometry,
    pub(super) scale_cache: ScaleCache,
    pub(super) focus: FocusManager,
    pub(super) auto_scroll: AutoScrollController,
    pub(super) drag: Option<DragSession>,
    pub(super) track_press: Option<TrackPress>,
    pub(super) listeners: IndexMap<String, Box<dyn SelectionListener>>,
    pub(super) pending_commands: SliderCommands,
    pub(super) draining_commands: bool,
}

impl std::fmt::Debug for SliderEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderEngine")
            .field("selection", &self.selection)
            .field("display_unit", &self.display_unit)
            .field("drag", &self.drag)
            .field("focus", &self.focus)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl SliderEngine {
    /// Builds an engine. Fails only on configuration errors, most notably an
    /// axis whose start is not before its end.
    pub fn new(config: SliderConfig) -> SliderResult<Self> {
        let axis = validate_config(&config)?;
        let track = TrackGeometry::new(config.track_left_px, config.container_width_px);
        let mut scale_cache = ScaleCache::default();
        scale_cache.refresh(&config, axis, config.display_unit);
        let selection = SelectionStateMachine::new(
            axis,
            config.topology,
            config.initial,
            RangeGap::new(config.min_gap_scale_units, config.display_unit),
        );

        let mut engine = Self {
            config,
            selection,
            display_unit: config.display_unit,
            track,
            scale_cache,
            focus: FocusManager::new(config.topology, config.display_unit_control),
            auto_scroll: AutoScrollController::new(
                config.auto_scroll,
                config.container_width_px,
                config.viewport_width_or_container(),
            ),
            drag: None,
            track_press: None,
            listeners: IndexMap::new(),
            pending_commands: SliderCommands::default(),
            draining_commands: false,
        };
        debug!(
            topology = ?config.topology,
            start = %axis.start(),
            end = %axis.end(),
            granularity = ?axis.granularity(),
            "slider engine created"
        );
        engine.reveal_active_handle();
        Ok(engine)
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[must_use]
    pub fn axis(&self) -> TimeAxis {
        self.selection.axis()
    }

    #[must_use]
    pub fn topology(&self) -> SelectionTopology {
        self.selection.topology()
    }

    #[must_use]
    pub fn display_unit(&self) -> DisplayUnit {
        self.display_unit
    }

    #[must_use]
    pub fn handle(&self, id: HandleId) -> Option<HandleState> {
        self.selection.handle(id)
    }

    #[must_use]
    pub fn handles(&self) -> Vec<HandleState> {
        self.selection.handles().into_vec()
    }

    #[must_use]
    pub fn instant_of(&self, id: HandleId) -> Option<DateTime<Utc>> {
        self.selection.instant_of(id)
    }

    /// Selection implied by the handles right now, committed or not.
    #[must_use]
    pub fn current_result(&self) -> SelectionResult {
        self.selection.current_result()
    }

    /// Last result handed to listeners.
    #[must_use]
    pub fn committed_result(&self) -> Option<SelectionResult> {
        self.selection.committed()
    }

    /// Minimum distance between range endpoints, in display-unit ticks.
    #[must_use]
    pub fn range_gap(&self) -> RangeGap {
        self.selection.gap()
    }

    /// Nominal percent width of the range gap: the gap units times the
    /// average tick spacing. Month and year gaps are enforced on the
    /// calendar, so individual ranges may differ slightly from this.
    #[must_use]
    pub fn min_gap_percent(&self) -> f64 {
        self.scale_cache
            .min_gap_percent(self.config.min_gap_scale_units)
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag
    }

    #[must_use]
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus.focused()
    }

    #[must_use]
    pub fn track_geometry(&self) -> TrackGeometry {
        self.track
    }

    /// Commits the current handles and emits the result once to every
    /// listener. Calling it again without a move emits the same result.
    pub fn commit(&mut self) -> SelectionResult {
        let result = self.selection.commit();
        self.emit_change(result);
        result
    }

    /// Replaces the axis range, keeping the current selection clamped into
    /// the new range.
    pub fn set_axis(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> SliderResult<()> {
        let config = SliderConfig {
            axis_start: start,
            axis_end: end,
            ..self.config
        };
        self.rebuild(config, self.carried_selection())
    }

    pub fn set_granularity(&mut self, granularity: SelectionGranularity) -> SliderResult<()> {
        let config = self.config.with_granularity(granularity);
        self.rebuild(config, self.carried_selection())
    }

    /// Switches topology. Handles that exist in both topologies keep their
    /// instants; new ones start from the configured initial values.
    pub fn set_topology(&mut self, topology: SelectionTopology) -> SliderResult<()> {
        let config = self.config.with_topology(topology);
        self.rebuild(config, self.carried_selection())
    }

    /// Replaces the whole configuration, selection included.
    pub fn reset(&mut self, config: SliderConfig) -> SliderResult<()> {
        self.rebuild(config, config.initial)
    }

    fn carried_selection(&self) -> InitialSelection {
        let mut initial = self.config.initial;
        match self.selection.current_result() {
            SelectionResult::Point { point } => initial.point = Some(point),
            SelectionResult::Range { range } => initial.range = Some(range),
            SelectionResult::Combined { point, range } => {
                initial.point = Some(point);
                initial.range = Some(range);
            }
        }
        initial
    }

    fn rebuild(&mut self, config: SliderConfig, initial: InitialSelection) -> SliderResult<()> {
        let axis = validate_config(&config)?;
        self.cancel_gesture();

        self.scale_cache.refresh(&config, axis, config.display_unit);
        self.selection = SelectionStateMachine::new(
            axis,
            config.topology,
            initial,
            RangeGap::new(config.min_gap_scale_units, config.display_unit),
        );
        self.display_unit = config.display_unit;
        self.track = TrackGeometry::new(config.track_left_px, config.container_width_px);
        self.focus
            .reconfigure(config.topology, config.display_unit_control);
        self.selection.set_focused(self.focus.focused_handle());
        self.auto_scroll.set_behavior(config.auto_scroll);
        self.auto_scroll
            .resize(config.container_width_px, config.viewport_width_or_container());
        self.config = config;

        debug!(
            topology = ?config.topology,
            start = %axis.start(),
            end = %axis.end(),
            "slider engine reconfigured"
        );
        self.emit_event(SliderEvent::Reconfigured);
        Ok(())
    }
}
