use ordered_float::OrderedFloat;
use tracing::{debug, trace, warn};

use crate::core::{HandleId, SelectionResult, clamp_percent};
use crate::extensions::SliderEvent;
use crate::interaction::{
    DragSession, FocusTarget, GestureState, PointerInput, PointerTarget, TrackPress,
};

use super::{DragEmission, SliderEngine};

impl SliderEngine {
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        match (self.drag, self.track_press) {
            (Some(session), _) => GestureState::Dragging(session.handle),
            (None, Some(_)) => GestureState::TrackPressed,
            (None, None) => GestureState::Idle,
        }
    }

    /// Axis percent under `client_x` with the current scroll applied. Not clamped.
    #[must_use]
    pub fn pointer_percent(&self, client_x: f64) -> f64 {
        self.track
            .pointer_percent(client_x, self.auto_scroll.scroll_offset_px())
    }

    /// Resolves `client_x` to the nearest handle within the hit radius, or the track.
    #[must_use]
    pub fn hit_test(&self, client_x: f64) -> PointerTarget {
        let percent = self.pointer_percent(client_x);
        let radius_px = self.config.handle_hit_radius_px;
        self.selection
            .handles()
            .into_iter()
            .map(|handle| {
                let distance_px = self.track.percent_to_px((handle.position - percent).abs());
                (OrderedFloat(distance_px), handle.id)
            })
            .filter(|(distance_px, _)| distance_px.0 <= radius_px)
            .min_by_key(|(distance_px, _)| *distance_px)
            .map_or(PointerTarget::Track, |(_, id)| PointerTarget::Handle(id))
    }

    /// Gesture start. A second pointer arriving mid-drag cancels the drag.
    pub fn pointer_down(&mut self, input: PointerInput, target: PointerTarget) {
        if !input.client_x.is_finite() {
            warn!(pointer_id = input.pointer_id, "ignoring non-finite pointer down");
            return;
        }
        if let Some(session) = self.drag {
            if session.pointer_id != input.pointer_id {
                debug!(
                    active = session.pointer_id,
                    incoming = input.pointer_id,
                    "second pointer during drag, canceling gesture"
                );
                self.cancel_gesture();
            }
            return;
        }

        match target {
            PointerTarget::Handle(handle) => self.start_drag(handle, input),
            PointerTarget::Track => {
                self.track_press = Some(TrackPress {
                    pointer_id: input.pointer_id,
                    client_x: input.client_x,
                    exceeded_slop: false,
                });
            }
        }
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        if !input.client_x.is_finite() {
            warn!(pointer_id = input.pointer_id, "ignoring non-finite pointer move");
            return;
        }
        if let Some(session) = self
            .drag
            .filter(|session| session.pointer_id == input.pointer_id)
        {
            self.drag_to(session, input.client_x);
            self.auto_scroll.request_frame();
            return;
        }

        let slop_px = self.config.click_slop_px;
        if let Some(press) = self
            .track_press
            .as_mut()
            .filter(|press| press.pointer_id == input.pointer_id)
        {
            if (input.client_x - press.client_x).abs() > slop_px {
                press.exceeded_slop = true;
            }
        }
    }

    /// Gesture end. Commits a drag, or resolves a track press as a click.
    pub fn pointer_up(&mut self, input: PointerInput) -> Option<SelectionResult> {
        if let Some(session) = self
            .drag
            .filter(|session| session.pointer_id == input.pointer_id)
        {
            self.drag = None;
            self.selection.set_dragging(None);
            let result = self.commit();
            debug!(handle = ?session.handle, ?result, "drag ended");
            self.emit_event(SliderEvent::DragEnded {
                handle: session.handle,
            });
            return Some(result);
        }

        let press = self
            .track_press
            .filter(|press| press.pointer_id == input.pointer_id)?;
        self.track_press = None;
        if press.exceeded_slop {
            trace!("track press moved beyond click slop, not a click");
            return None;
        }
        self.track_click(press.client_x)
    }

    /// Pointer capture lost. The handle stays where the last move left it and
    /// nothing is emitted.
    pub fn pointer_cancel(&mut self, input: PointerInput) {
        let owns_gesture = self
            .drag
            .is_some_and(|session| session.pointer_id == input.pointer_id)
            || self
                .track_press
                .is_some_and(|press| press.pointer_id == input.pointer_id);
        if owns_gesture {
            self.cancel_gesture();
        }
    }

    /// Click on the bare track. Moves the nearest handle to the click, either
    /// exactly or onto the nearest tick depending on
    /// `free_selection_on_track_click`.
    pub fn track_click(&mut self, client_x: f64) -> Option<SelectionResult> {
        if !client_x.is_finite() {
            warn!("ignoring non-finite track click");
            return None;
        }
        let percent = clamp_percent(self.pointer_percent(client_x));
        let handle = self.selection.nearest_handle(percent);
        let target = if self.config.free_selection_on_track_click {
            percent
        } else {
            self.nearest_scale_position(percent).unwrap_or(percent)
        };

        trace!(?handle, percent, target, "track click");
        self.selection.propose_move(handle, target)?;
        let result = self.commit();
        self.reveal_handle(handle);
        Some(result)
    }

    /// Moves the dragged handle under the pointer at `client_x`, mapped with
    /// the current scroll offset.
    pub(super) fn drag_to(&mut self, mut session: DragSession, client_x: f64) {
        let candidate = session.track(client_x, self.pointer_percent(client_x));
        let Some(position) = self.selection.propose_move(session.handle, candidate) else {
            return;
        };
        let changed = position != session.last_committed_percent;
        if self.config.drag_emission == DragEmission::OnMove && changed {
            session.last_committed_percent = position;
            self.drag = Some(session);
            self.commit();
        } else {
            self.drag = Some(session);
        }
    }

    pub(super) fn cancel_gesture(&mut self) {
        self.track_press = None;
        if let Some(session) = self.drag.take() {
            self.selection.set_dragging(None);
            debug!(handle = ?session.handle, "drag canceled");
            self.emit_event(SliderEvent::DragCanceled {
                handle: session.handle,
            });
        }
    }

    fn start_drag(&mut self, handle: HandleId, input: PointerInput) {
        let Some(state) = self.selection.handle(handle) else {
            warn!(?handle, "ignoring drag on absent handle");
            return;
        };
        let pointer_percent = self.pointer_percent(input.client_x);
        self.drag = Some(DragSession::new(
            handle,
            input.pointer_id,
            input.client_x,
            pointer_percent,
            state.position,
        ));
        self.selection.set_dragging(Some(handle));
        if self.focus.focused_handle() != Some(handle) {
            self.focus_target(FocusTarget::Handle(handle));
        }
        debug!(?handle, kind = ?input.kind, "drag started");
        self.emit_event(SliderEvent::DragStarted { handle });
    }

    fn nearest_scale_position(&self, percent: f64) -> Option<f64> {
        self.scale_cache
            .scales()
            .iter()
            .min_by_key(|scale| OrderedFloat((scale.position - percent).abs()))
            .map(|scale| scale.position)
    }
}
