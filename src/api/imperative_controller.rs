use chrono::{DateTime, Utc};
use tracing::{trace, warn};

use crate::core::{HandleId, SelectionResult, percent_from_instant};
use crate::extensions::SliderEvent;
use crate::interaction::FocusTarget;

use super::SliderEngine;

impl SliderEngine {
    /// Moves a handle to `instant` as one full commit cycle.
    ///
    /// `instant` is clamped into the axis. `handle` defaults to the topology's
    /// primary handle; a handle the topology does not have makes this a no-op
    /// returning `None`.
    pub fn set_date_time(
        &mut self,
        instant: DateTime<Utc>,
        handle: Option<HandleId>,
    ) -> Option<SelectionResult> {
        let topology = self.selection.topology();
        let handle = handle.unwrap_or(topology.primary_handle());
        if !topology.has_handle(handle) {
            warn!(?handle, ?topology, "ignoring set_date_time for absent handle");
            return None;
        }

        let axis = self.selection.axis();
        let clamped = axis.clamp(instant);
        if clamped != instant {
            trace!(%instant, %clamped, "clamped imperative instant into axis");
        }
        let position = self
            .selection
            .propose_move(handle, percent_from_instant(clamped, axis))?;
        if let Some(session) = self.drag.as_mut().filter(|session| session.handle == handle) {
            session.rebase(position);
        }
        let result = self.commit();
        self.reveal_handle(handle);
        Some(result)
    }

    /// Moves keyboard focus to `handle` when the topology has it. Returns
    /// `false` for a no-op.
    pub fn focus_handle(&mut self, handle: HandleId) -> bool {
        if !self.focus_target(FocusTarget::Handle(handle)) {
            warn!(?handle, "ignoring focus request for absent handle");
            return false;
        }
        self.reveal_handle(handle);
        true
    }

    /// Focus-in from the host (click, programmatic focus).
    pub fn focus_target(&mut self, target: FocusTarget) -> bool {
        if !self.focus.focus_in(target) {
            return false;
        }
        self.sync_focus();
        true
    }

    /// Focus-out from the host.
    pub fn blur(&mut self) {
        if self.focus.focus_out().is_some() {
            self.sync_focus();
        }
    }

    /// Handle that auto-scroll keeps visible: the dragged one, else the
    /// focused one, else the topology's primary handle.
    #[must_use]
    pub fn active_handle(&self) -> HandleId {
        self.drag
            .map(|session| session.handle)
            .or(self.focus.focused_handle())
            .unwrap_or(self.selection.topology().primary_handle())
    }

    pub(super) fn sync_focus(&mut self) {
        self.selection.set_focused(self.focus.focused_handle());
        let target = self.focus.focused();
        self.emit_event(SliderEvent::FocusChanged { target });
    }

    pub(super) fn reveal_active_handle(&mut self) {
        self.reveal_handle(self.active_handle());
    }

    pub(super) fn reveal_handle(&mut self, handle: HandleId) {
        let Some(state) = self.selection.handle(handle) else {
            return;
        };
        let x_px = self.track.percent_to_px(state.position);
        if let Some(scroll_left_px) = self.auto_scroll.reveal(x_px) {
            self.emit_event(SliderEvent::Scrolled { scroll_left_px });
        }
    }
}
