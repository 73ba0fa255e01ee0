use tracing::trace;

use crate::error::SliderResult;
use crate::extensions::SliderEvent;
use crate::interaction::{AutoScrollBehavior, DragSession, ScrollViewport};

use super::SliderEngine;
use super::validation::validate_auto_scroll_behavior;

impl SliderEngine {
    #[must_use]
    pub fn scroll_viewport(&self) -> ScrollViewport {
        self.auto_scroll.viewport()
    }

    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.auto_scroll.frame_requested()
    }

    /// Asks for a measurement pass on the next animation frame.
    pub fn request_frame(&mut self) {
        self.auto_scroll.request_frame();
    }

    /// Host reports that the user scrolled the container.
    pub fn sync_scroll_left(&mut self, scroll_left_px: f64) {
        self.auto_scroll.sync_scroll_left(scroll_left_px);
    }

    /// Host-supplied auto-scroll tuning.
    pub fn set_auto_scroll_behavior(&mut self, behavior: AutoScrollBehavior) -> SliderResult<()> {
        let behavior = validate_auto_scroll_behavior(behavior)?;
        self.config.auto_scroll = behavior;
        self.auto_scroll.set_behavior(behavior);
        Ok(())
    }

    /// Animation-frame callback. Runs at most one measurement pass for any
    /// number of requests since the previous frame.
    ///
    /// Without a drag it only scrolls. During a drag near the viewport edge it
    /// scrolls one step, re-maps the stationary pointer onto the shifted track
    /// so the handle stays under it, and asks for another frame while the
    /// handle remains in the edge zone.
    ///
    /// Returns the new scroll offset when the viewport moved.
    pub fn animation_frame(&mut self) -> Option<f64> {
        if !self.auto_scroll.take_frame() {
            return None;
        }

        let scrolled = match self.drag {
            Some(session) => self.edge_scroll_frame(session),
            None => {
                let handle = self.selection.handle(self.active_handle())?;
                self.auto_scroll
                    .reveal(self.track.percent_to_px(handle.position))
            }
        }?;

        trace!(scroll_left_px = scrolled, "auto-scrolled viewport");
        self.emit_event(SliderEvent::Scrolled {
            scroll_left_px: scrolled,
        });
        Some(scrolled)
    }

    fn edge_scroll_frame(&mut self, session: DragSession) -> Option<f64> {
        let direction = session.direction()?;
        let handle = self.selection.handle(session.handle)?;
        let scrolled = self
            .auto_scroll
            .edge_step(self.track.percent_to_px(handle.position), direction)?;

        self.drag_to(session, session.last_client_x);
        let still_at_edge = self
            .drag
            .and_then(|session| self.selection.handle(session.handle))
            .is_some_and(|handle| {
                self.auto_scroll
                    .in_edge_zone(self.track.percent_to_px(handle.position), direction)
            });
        if still_at_edge {
            self.auto_scroll.request_frame();
        }
        Some(scrolled)
    }
}
